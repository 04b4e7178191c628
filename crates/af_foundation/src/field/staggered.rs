// crates/af_foundation/src/field/staggered.rs

//! 交错（面心/边心）场
//!
//! 每个方向 `d` 一组数组，其数据盒为单元盒沿 `d` 上界加一。
//! 两种线性化只差存储轴顺序：
//!
//! | 类型 | x 数组 | y 数组 | z 数组 |
//! |---|---|---|---|
//! | [`FaceField`] | `(i,j,k)` | `(j,k,i)`，2D 为 `(j,i)` | `(k,i,j)` |
//! | [`SideField`] | `(i,j,k)` | `(i,j,k)` | `(i,j,k)` |
//!
//! 视图以全局索引寻址，因此上层核函数不关心具体顺序。

use super::layout::{ArrayLayout, ArrayView, ArrayViewMut};
use crate::contract;
use crate::dimension::{Dimension, Direction};
use crate::index_box::IndexBox;
use crate::int_vector::IntVector;
use std::marker::PhantomData;

/// 交错场的轴顺序策略
pub trait StaggeredOrdering: Send + Sync + 'static {
    /// 类型名（用于日志与错误信息）
    const KIND: &'static str;

    /// 为法向 `normal` 的数组构造布局
    fn layout(data_box: IndexBox, ghosts: IntVector, normal: Direction) -> ArrayLayout;
}

/// 面心顺序：法向为最快变化轴，其余轴循环轮换
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceOrdering;

impl StaggeredOrdering for FaceOrdering {
    const KIND: &'static str = "FaceField";

    fn layout(data_box: IndexBox, ghosts: IntVector, normal: Direction) -> ArrayLayout {
        ArrayLayout::rotated(data_box, ghosts, normal.axis())
    }
}

/// 边心顺序：所有方向均为自然顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideOrdering;

impl StaggeredOrdering for SideOrdering {
    const KIND: &'static str = "SideField";

    fn layout(data_box: IndexBox, ghosts: IntVector, _normal: Direction) -> ArrayLayout {
        ArrayLayout::natural(data_box, ghosts)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DirectionalArray {
    layout: ArrayLayout,
    data: Vec<f64>,
}

/// 交错多分量场
#[derive(Debug, Clone, PartialEq)]
pub struct StaggeredField<O: StaggeredOrdering> {
    name: String,
    cell_box: IndexBox,
    ghosts: IntVector,
    depth: usize,
    arrays: Vec<DirectionalArray>,
    _ordering: PhantomData<O>,
}

/// 面心场（轮换线性化）
pub type FaceField = StaggeredField<FaceOrdering>;

/// 边心场（自然线性化）
pub type SideField = StaggeredField<SideOrdering>;

impl<O: StaggeredOrdering> StaggeredField<O> {
    /// 创建并以 0 初始化；`cell_box` 为单元索引空间的内部盒
    pub fn new(name: impl Into<String>, cell_box: IndexBox, ghosts: IntVector, depth: usize) -> Self {
        let arrays = Direction::all(cell_box.dim())
            .map(|d| {
                let layout = O::layout(cell_box.extend_upper(d.axis(), 1), ghosts, d);
                let data = vec![0.0; depth * layout.component_stride()];
                DirectionalArray { layout, data }
            })
            .collect();
        Self {
            name: name.into(),
            cell_box,
            ghosts,
            depth,
            arrays,
            _ordering: PhantomData,
        }
    }

    /// 场名称
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 维度
    #[inline]
    pub fn dim(&self) -> Dimension {
        self.cell_box.dim()
    }

    /// 单元索引空间的内部盒
    #[inline]
    pub fn cell_box(&self) -> IndexBox {
        self.cell_box
    }

    /// 幽灵层宽度
    #[inline]
    pub fn ghosts(&self) -> IntVector {
        self.ghosts
    }

    /// 分量数
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn array(&self, normal: Direction) -> &DirectionalArray {
        contract!(
            normal.exists_in(self.dim()),
            "{} '{}': {} 方向不存在于 {} 问题",
            O::KIND,
            self.name,
            normal,
            self.dim()
        );
        &self.arrays[normal.axis()]
    }

    /// 法向 `normal` 数组的布局
    pub fn layout(&self, normal: Direction) -> &ArrayLayout {
        &self.array(normal).layout
    }

    /// 法向 `normal` 数组的内部盒（单元盒上界加一）
    pub fn array_box(&self, normal: Direction) -> IndexBox {
        self.layout(normal).data_box()
    }

    /// 法向 `normal` 数组的全部原始数据
    pub fn raw(&self, normal: Direction) -> &[f64] {
        &self.array(normal).data
    }

    fn component_range(&self, normal: Direction, component: usize) -> std::ops::Range<usize> {
        contract!(
            component < self.depth,
            "{} '{}': 分量 {} 超出深度 {}",
            O::KIND,
            self.name,
            component,
            self.depth
        );
        let n = self.layout(normal).component_stride();
        component * n..(component + 1) * n
    }

    /// 只读视图
    pub fn view(&self, normal: Direction, component: usize) -> ArrayView<'_> {
        let range = self.component_range(normal, component);
        let array = &self.arrays[normal.axis()];
        ArrayView::new(&array.layout, &array.data[range])
    }

    /// 可写视图
    pub fn view_mut(&mut self, normal: Direction, component: usize) -> ArrayViewMut<'_> {
        let range = self.component_range(normal, component);
        let array = &mut self.arrays[normal.axis()];
        ArrayViewMut::new(&array.layout, &mut array.data[range])
    }

    /// 按全局索引取值
    #[inline]
    pub fn get(&self, normal: Direction, point: [i32; 3], component: usize) -> f64 {
        self.view(normal, component).get(point)
    }

    /// 按全局索引写入
    #[inline]
    pub fn set(&mut self, normal: Direction, point: [i32; 3], component: usize, value: f64) {
        self.view_mut(normal, component).set(point, value);
    }

    /// 所有方向、所有分量填为常数
    pub fn fill(&mut self, value: f64) {
        for array in &mut self.arrays {
            array.data.fill(value);
        }
    }
}
