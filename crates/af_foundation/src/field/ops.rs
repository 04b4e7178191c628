// crates/af_foundation/src/field/ops.rs

//! 区域运算
//!
//! - [`Centering`]: 数据中心位置（单元或某方向的边/面）
//! - [`CenteredData`]: 按中心位置取视图的统一接口，单元场与交错场都实现
//! - [`ScratchArray`]: 只覆盖计算区域的临时数组
//! - [`evaluation_region`]: 可选区域 → 实际遍历区域

use super::cell::CellField;
use super::layout::{ArrayLayout, ArrayView, ArrayViewMut};
use super::staggered::{StaggeredField, StaggeredOrdering};
use crate::contract;
use crate::dimension::Direction;
use crate::index_box::IndexBox;
use crate::int_vector::IntVector;
use std::fmt;

/// 数据中心位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Centering {
    /// 单元中心
    Cell,
    /// 法向为给定方向的边/面中心
    Side(Direction),
}

impl fmt::Display for Centering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Centering::Cell => write!(f, "cell"),
            Centering::Side(d) => write!(f, "side-{}", d),
        }
    }
}

/// 按中心位置访问的多分量数据
pub trait CenteredData {
    /// 数据名称
    fn data_name(&self) -> &str;

    /// 分量数
    fn data_depth(&self) -> usize;

    /// 该中心位置的数组布局
    fn centered_layout(&self, centering: Centering) -> &ArrayLayout;

    /// 只读视图
    fn centered_view(&self, centering: Centering, component: usize) -> ArrayView<'_>;

    /// 可写视图
    fn centered_view_mut(&mut self, centering: Centering, component: usize) -> ArrayViewMut<'_>;
}

impl CenteredData for CellField {
    fn data_name(&self) -> &str {
        self.name()
    }

    fn data_depth(&self) -> usize {
        self.depth()
    }

    fn centered_layout(&self, centering: Centering) -> &ArrayLayout {
        contract!(
            centering == Centering::Cell,
            "CellField '{}' 只能按单元中心访问, 请求 {}",
            self.name(),
            centering
        );
        self.layout()
    }

    fn centered_view(&self, centering: Centering, component: usize) -> ArrayView<'_> {
        let _ = self.centered_layout(centering);
        self.view(component)
    }

    fn centered_view_mut(&mut self, centering: Centering, component: usize) -> ArrayViewMut<'_> {
        let _ = self.centered_layout(centering);
        self.view_mut(component)
    }
}

impl<O: StaggeredOrdering> CenteredData for StaggeredField<O> {
    fn data_name(&self) -> &str {
        self.name()
    }

    fn data_depth(&self) -> usize {
        self.depth()
    }

    fn centered_layout(&self, centering: Centering) -> &ArrayLayout {
        match centering {
            Centering::Side(normal) => self.layout(normal),
            Centering::Cell => panic!(
                "契约违反: {} '{}' 不能按单元中心访问",
                O::KIND,
                self.name()
            ),
        }
    }

    fn centered_view(&self, centering: Centering, component: usize) -> ArrayView<'_> {
        match centering {
            Centering::Side(normal) => self.view(normal, component),
            Centering::Cell => panic!("契约违反: {} '{}' 不能按单元中心访问", O::KIND, self.name()),
        }
    }

    fn centered_view_mut(&mut self, centering: Centering, component: usize) -> ArrayViewMut<'_> {
        match centering {
            Centering::Side(normal) => self.view_mut(normal, component),
            Centering::Cell => panic!("契约违反: {} '{}' 不能按单元中心访问", O::KIND, self.name()),
        }
    }
}

/// 计算实际遍历区域
///
/// `domain` 位于单元索引空间；空盒表示输出数组的整个幽灵盒。
/// 边心数据的区域沿法向上界加一。
pub fn evaluation_region(domain: &IndexBox, centering: Centering, output: &ArrayLayout) -> IndexBox {
    if domain.is_empty() {
        return output.ghost_box();
    }
    match centering {
        Centering::Cell => *domain,
        Centering::Side(normal) => domain.extend_upper(normal.axis(), 1),
    }
}

/// 检查数据在区域上可读/可写
pub fn check_covers(data: &dyn CenteredData, centering: Centering, region: &IndexBox) {
    contract!(
        data.centered_layout(centering).ghost_box().contains(region),
        "'{}' 的 {} 幽灵盒 {} 不包含计算区域 {}",
        data.data_name(),
        centering,
        data.centered_layout(centering).ghost_box(),
        region
    );
}

// ============================================================================
// 临时数组
// ============================================================================

/// 只覆盖计算区域的单分量临时数组
#[derive(Debug, Clone)]
pub struct ScratchArray {
    layout: ArrayLayout,
    data: Vec<f64>,
}

impl ScratchArray {
    /// 在 `region` 上创建并以 `value` 初始化
    pub fn new(region: IndexBox, value: f64) -> Self {
        let layout = ArrayLayout::natural(region, IntVector::zero(region.dim()));
        let data = vec![value; layout.component_stride()];
        Self { layout, data }
    }

    /// 覆盖的区域
    #[inline]
    pub fn region(&self) -> IndexBox {
        self.layout.data_box()
    }

    /// 按全局索引取值
    #[inline]
    pub fn get(&self, point: [i32; 3]) -> f64 {
        self.data[self.layout.offset(point)]
    }

    /// 按全局索引取可变引用
    #[inline]
    pub fn get_mut(&mut self, point: [i32; 3]) -> &mut f64 {
        let off = self.layout.offset(point);
        &mut self.data[off]
    }

    /// 逐点变换
    pub fn map_in_place(&mut self, mut f: impl FnMut(f64) -> f64) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }
}

/// 在区域上逐点写入 `out`
pub fn fill_region(out: &mut ArrayViewMut<'_>, region: &IndexBox, mut f: impl FnMut([i32; 3]) -> f64) {
    region.for_each_point(|p| out.set(p, f(p)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::field::staggered::SideField;

    #[test]
    fn test_evaluation_region() {
        let cells = IndexBox::from_shape(Dimension::Two, &[4, 3]);
        let side = SideField::new("p", cells, IntVector::uniform(Dimension::Two, 1), 1);
        let layout = side.centered_layout(Centering::Side(Direction::X));

        let domain = IndexBox::from_bounds(Dimension::Two, &[1, 1], &[2, 2]);
        let region = evaluation_region(&domain, Centering::Side(Direction::X), layout);
        assert_eq!(region, IndexBox::from_bounds(Dimension::Two, &[1, 1], &[3, 2]));

        let full = evaluation_region(&IndexBox::empty(Dimension::Two), Centering::Side(Direction::X), layout);
        assert_eq!(full, IndexBox::from_bounds(Dimension::Two, &[-1, -1], &[5, 3]));
    }

    #[test]
    fn test_scratch_array() {
        let region = IndexBox::from_bounds(Dimension::One, &[-2], &[2]);
        let mut s = ScratchArray::new(region, 1.0);
        *s.get_mut([-2, 0, 0]) += 2.0;
        s.map_in_place(|v| v * 2.0);
        assert_eq!(s.get([-2, 0, 0]), 6.0);
        assert_eq!(s.get([2, 0, 0]), 2.0);
        assert_eq!(s.region(), region);
    }

    #[test]
    fn test_fill_region_cell() {
        let cells = IndexBox::from_shape(Dimension::One, &[4]);
        let mut field = CellField::new("T", cells, IntVector::uniform(Dimension::One, 2), 1);
        let region = evaluation_region(&IndexBox::empty(Dimension::One), Centering::Cell, field.layout());
        check_covers(&field, Centering::Cell, &region);
        let mut view = field.centered_view_mut(Centering::Cell, 0);
        fill_region(&mut view, &region, |p| p[0] as f64);
        assert_eq!(field.get([-2, 0, 0], 0), -2.0);
        assert_eq!(field.get([5, 0, 0], 0), 5.0);
    }

    #[test]
    #[should_panic(expected = "契约违反")]
    fn test_side_field_rejects_cell_centering() {
        let cells = IndexBox::from_shape(Dimension::One, &[4]);
        let side = SideField::new("p", cells, IntVector::zero(Dimension::One), 1);
        let _ = side.centered_view(Centering::Cell, 0);
    }
}
