// crates/af_foundation/src/field/cell.rs

//! 单元中心场

use super::layout::{ArrayLayout, ArrayView, ArrayViewMut};
use crate::contract;
use crate::index_box::IndexBox;
use crate::int_vector::IntVector;

/// 单元中心多分量场
///
/// 数据为一块 `depth * component_stride` 的连续数组，分量主序。
#[derive(Debug, Clone, PartialEq)]
pub struct CellField {
    name: String,
    layout: ArrayLayout,
    depth: usize,
    data: Vec<f64>,
}

impl CellField {
    /// 创建并以 0 初始化
    pub fn new(name: impl Into<String>, interior: IndexBox, ghosts: IntVector, depth: usize) -> Self {
        let layout = ArrayLayout::natural(interior, ghosts);
        let data = vec![0.0; depth * layout.component_stride()];
        Self {
            name: name.into(),
            layout,
            depth,
            data,
        }
    }

    /// 场名称
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 内部盒
    #[inline]
    pub fn interior_box(&self) -> IndexBox {
        self.layout.data_box()
    }

    /// 含幽灵层的盒
    #[inline]
    pub fn ghost_box(&self) -> IndexBox {
        self.layout.ghost_box()
    }

    /// 幽灵层宽度
    #[inline]
    pub fn ghosts(&self) -> IntVector {
        self.layout.ghosts()
    }

    /// 分量数
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// 布局
    #[inline]
    pub fn layout(&self) -> &ArrayLayout {
        &self.layout
    }

    /// 全部数据
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    fn component_range(&self, component: usize) -> std::ops::Range<usize> {
        contract!(
            component < self.depth,
            "CellField '{}': 分量 {} 超出深度 {}",
            self.name,
            component,
            self.depth
        );
        let n = self.layout.component_stride();
        component * n..(component + 1) * n
    }

    /// 某分量的只读视图
    pub fn view(&self, component: usize) -> ArrayView<'_> {
        let range = self.component_range(component);
        ArrayView::new(&self.layout, &self.data[range])
    }

    /// 某分量的可写视图
    pub fn view_mut(&mut self, component: usize) -> ArrayViewMut<'_> {
        let range = self.component_range(component);
        ArrayViewMut::new(&self.layout, &mut self.data[range])
    }

    /// 按全局索引取值
    #[inline]
    pub fn get(&self, point: [i32; 3], component: usize) -> f64 {
        self.view(component).get(point)
    }

    /// 按全局索引写入
    #[inline]
    pub fn set(&mut self, point: [i32; 3], component: usize, value: f64) {
        self.view_mut(component).set(point, value);
    }

    /// 所有分量（含幽灵层）填为常数
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// 在整个幽灵盒上用函数填充某分量
    pub fn fill_with(&mut self, component: usize, mut f: impl FnMut([i32; 3]) -> f64) {
        let ghost_box = self.ghost_box();
        let mut view = self.view_mut(component);
        ghost_box.for_each_point(|p| view.set(p, f(p)));
    }
}
