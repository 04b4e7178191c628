// crates/af_foundation/src/contract.rs

//! 协作方契约检查
//!
//! 协作方之间的前置条件（列表长度一致、幽灵层足够、分量下标在范围内等）
//! 属于编程错误，不通过 `AfResult` 返回。
//!
//! # 两种构建模式
//!
//! - **checked**: `debug_assertions` 或 `checked` feature 开启时，
//!   [`contract!`](crate::contract!) 求值条件，失败即 panic 并给出对象名称。
//! - **fast**: 其余情况下条件不求值。核函数内部的切片访问仍有边界检查，
//!   违约会在越界处 panic，不会读到分配之外的内存。

/// 是否启用契约检查
pub const CONTRACTS_ENABLED: bool = cfg!(any(debug_assertions, feature = "checked"));

/// 契约断言
///
/// ```should_panic
/// af_foundation::contract!(1 + 1 == 3, "arithmetic: {} is broken", "addition");
/// ```
#[macro_export]
macro_rules! contract {
    ($cond:expr, $($arg:tt)+) => {
        if $crate::contract::CONTRACTS_ENABLED && !$cond {
            panic!("契约违反: {}", format_args!($($arg)+));
        }
    };
}
