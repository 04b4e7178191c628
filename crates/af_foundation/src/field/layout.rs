// crates/af_foundation/src/field/layout.rs

//! 单个带幽灵层数组的内存布局
//!
//! # 线性化规则
//!
//! ```text
//! offset(p) = Σ_a (p[a] - ghost_lower[a]) * stride[a]
//!           = Σ_a (local[a] + ghost[a]) * stride[a]
//! ```
//!
//! 步长由幽灵扩展后的形状按存储轴顺序计算：`order[0]` 变化最快。
//! 自然顺序为 `(x, y, z)`；面心数据按法向轮换，例如 y 面为 `(y, z, x)`。
//! 多分量数组按分量主序存储，每个分量是一整块幽灵扩展体。

use crate::contract;
use crate::dimension::Dimension;
use crate::index_box::IndexBox;
use crate::int_vector::IntVector;

/// 数组布局
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayLayout {
    data_box: IndexBox,
    ghosts: IntVector,
    ghost_box: IndexBox,
    order: [usize; 3],
    strides: [usize; 3],
    component_stride: usize,
}

impl ArrayLayout {
    /// 自然顺序 (x, y, z) 布局
    pub fn natural(data_box: IndexBox, ghosts: IntVector) -> Self {
        Self::with_order(data_box, ghosts, [0, 1, 2])
    }

    /// 以 `leading` 轴为最快变化轴、其余轴循环轮换的布局
    pub fn rotated(data_box: IndexBox, ghosts: IntVector, leading: usize) -> Self {
        let n = data_box.dim().n();
        let mut order = [0, 1, 2];
        for (s, slot) in order.iter_mut().enumerate().take(n) {
            *slot = (leading + s) % n;
        }
        Self::with_order(data_box, ghosts, order)
    }

    fn with_order(data_box: IndexBox, ghosts: IntVector, order: [usize; 3]) -> Self {
        assert_eq!(data_box.dim(), ghosts.dim(), "ArrayLayout: 盒与幽灵层维度不一致");
        assert!(ghosts.all_ge_scalar(0), "ArrayLayout: 幽灵层宽度不能为负");
        let ghost_box = data_box.grow(&ghosts);
        let n = data_box.dim().n();
        let shape = ghost_box.shape();
        let mut strides = [0usize; 3];
        let mut stride = 1usize;
        for &axis in order.iter().take(n) {
            strides[axis] = stride;
            stride *= shape[axis].max(0) as usize;
        }
        Self {
            data_box,
            ghosts,
            ghost_box,
            order,
            strides,
            component_stride: stride,
        }
    }

    /// 维度
    #[inline]
    pub fn dim(&self) -> Dimension {
        self.data_box.dim()
    }

    /// 内部数据盒（不含幽灵层）
    #[inline]
    pub fn data_box(&self) -> IndexBox {
        self.data_box
    }

    /// 幽灵层宽度
    #[inline]
    pub fn ghosts(&self) -> IntVector {
        self.ghosts
    }

    /// 含幽灵层的数据盒
    #[inline]
    pub fn ghost_box(&self) -> IndexBox {
        self.ghost_box
    }

    /// 存储轴顺序，第一个变化最快
    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.order[..self.dim().n()]
    }

    /// 沿 `axis` 的步长
    #[inline]
    pub fn stride(&self, axis: usize) -> usize {
        self.strides[axis]
    }

    /// 单个分量的长度
    #[inline]
    pub fn component_stride(&self) -> usize {
        self.component_stride
    }

    /// 全局索引到分量内线性偏移
    #[inline]
    pub fn offset(&self, point: [i32; 3]) -> usize {
        let lo = self.ghost_box.lower();
        let mut off = 0usize;
        for a in 0..self.dim().n() {
            let local = point[a] - lo[a];
            debug_assert!(
                local >= 0,
                "ArrayLayout::offset: 点 {:?} 位于幽灵盒 {} 之外",
                point,
                self.ghost_box
            );
            off += local as usize * self.strides[a];
        }
        off
    }
}

// ============================================================================
// 视图
// ============================================================================

/// 单分量只读视图，以全局索引寻址
#[derive(Debug, Clone, Copy)]
pub struct ArrayView<'a> {
    layout: &'a ArrayLayout,
    data: &'a [f64],
}

impl<'a> ArrayView<'a> {
    /// 由布局和单分量数据创建
    pub fn new(layout: &'a ArrayLayout, data: &'a [f64]) -> Self {
        contract!(
            data.len() == layout.component_stride(),
            "ArrayView: 数据长度 {} 与布局 {} 不符",
            data.len(),
            layout.component_stride()
        );
        Self { layout, data }
    }

    /// 布局
    #[inline]
    pub fn layout(&self) -> &'a ArrayLayout {
        self.layout
    }

    /// 原始数据
    #[inline]
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// 按全局索引取值
    #[inline]
    pub fn get(&self, point: [i32; 3]) -> f64 {
        self.data[self.layout.offset(point)]
    }

    /// 按线性偏移取值
    #[inline]
    pub fn at(&self, offset: usize) -> f64 {
        self.data[offset]
    }
}

/// 单分量可写视图
#[derive(Debug)]
pub struct ArrayViewMut<'a> {
    layout: &'a ArrayLayout,
    data: &'a mut [f64],
}

impl<'a> ArrayViewMut<'a> {
    /// 由布局和单分量数据创建
    pub fn new(layout: &'a ArrayLayout, data: &'a mut [f64]) -> Self {
        contract!(
            data.len() == layout.component_stride(),
            "ArrayViewMut: 数据长度 {} 与布局 {} 不符",
            data.len(),
            layout.component_stride()
        );
        Self { layout, data }
    }

    /// 布局
    #[inline]
    pub fn layout(&self) -> &'a ArrayLayout {
        self.layout
    }

    /// 只读视图
    #[inline]
    pub fn as_view(&self) -> ArrayView<'_> {
        ArrayView {
            layout: self.layout,
            data: &*self.data,
        }
    }

    /// 原始数据
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut *self.data
    }

    /// 按全局索引取值
    #[inline]
    pub fn get(&self, point: [i32; 3]) -> f64 {
        self.data[self.layout.offset(point)]
    }

    /// 按全局索引写入
    #[inline]
    pub fn set(&mut self, point: [i32; 3], value: f64) {
        let off = self.layout.offset(point);
        self.data[off] = value;
    }

    /// 按全局索引累加
    #[inline]
    pub fn add(&mut self, point: [i32; 3], value: f64) {
        let off = self.layout.offset(point);
        self.data[off] += value;
    }

    /// 按线性偏移取可变引用
    #[inline]
    pub fn at_mut(&mut self, offset: usize) -> &mut f64 {
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_strides_1d() {
        let b = IndexBox::from_shape(Dimension::One, &[10]);
        let layout = ArrayLayout::natural(b, IntVector::uniform(Dimension::One, 4));
        assert_eq!(layout.component_stride(), 18);
        assert_eq!(layout.offset([-4, 0, 0]), 0);
        assert_eq!(layout.offset([0, 0, 0]), 4);
        assert_eq!(layout.offset([13, 0, 0]), 17);
    }

    #[test]
    fn test_natural_strides_3d() {
        let b = IndexBox::from_shape(Dimension::Three, &[4, 3, 2]);
        let layout = ArrayLayout::natural(b, IntVector::uniform(Dimension::Three, 1));
        // 扩展形状 (6, 5, 4)
        assert_eq!(layout.stride(0), 1);
        assert_eq!(layout.stride(1), 6);
        assert_eq!(layout.stride(2), 30);
        assert_eq!(layout.component_stride(), 120);
        assert_eq!(layout.offset([0, 0, 0]), 1 + 6 + 30);
    }

    #[test]
    fn test_rotated_order() {
        let b = IndexBox::from_shape(Dimension::Three, &[4, 3, 2]);
        let g = IntVector::zero(Dimension::Three);
        let y_faces = ArrayLayout::rotated(b, g, 1);
        assert_eq!(y_faces.order(), &[1, 2, 0]);
        assert_eq!(y_faces.stride(1), 1);
        assert_eq!(y_faces.stride(2), 3);
        assert_eq!(y_faces.stride(0), 6);

        let z_faces = ArrayLayout::rotated(b, g, 2);
        assert_eq!(z_faces.order(), &[2, 0, 1]);

        let b2 = IndexBox::from_shape(Dimension::Two, &[4, 3]);
        let y2 = ArrayLayout::rotated(b2, IntVector::zero(Dimension::Two), 1);
        assert_eq!(y2.order(), &[1, 0]);
        assert_eq!(y2.stride(0), 3);
    }

    #[test]
    fn test_view_get_set() {
        let b = IndexBox::from_shape(Dimension::Two, &[3, 2]);
        let layout = ArrayLayout::natural(b, IntVector::uniform(Dimension::Two, 1));
        let mut data = vec![0.0; layout.component_stride()];
        {
            let mut view = ArrayViewMut::new(&layout, &mut data);
            view.set([2, 1, 0], 5.0);
            view.add([2, 1, 0], 1.0);
            assert_eq!(view.get([2, 1, 0]), 6.0);
        }
        let view = ArrayView::new(&layout, &data);
        assert_eq!(view.get([2, 1, 0]), 6.0);
        assert_eq!(view.at(layout.offset([2, 1, 0])), 6.0);
    }
}
