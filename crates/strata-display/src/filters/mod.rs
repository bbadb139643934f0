//! Built-in highlight filters.
//!
//! | Name                   | Effect                                        |
//! |------------------------|-----------------------------------------------|
//! | `hlcpp`                | C/C++ syntax coloring                         |
//! | `regex`                | one user pattern in one color                 |
//! | `expand_tabs`          | tabs rendered as spaces to the next tab stop  |
//! | `number_lines`         | `%3d ` gutter atom at the start of each line  |
//! | `highlight_selections` | underline every selected char                 |
//!
//! Each module exposes the transformation as a free function over a
//! [`DisplayBuffer`](crate::DisplayBuffer) plus a small [`Filter`] wrapper
//! that carries its settings.

pub mod colorize;
pub mod numbers;
pub mod selections;
pub mod tabs;

use std::rc::Rc;
use std::sync::Arc;

use crate::filter::{Filter, FilterContext, FilterRegistry};
use crate::params::FilterParameters;
use crate::syntax::SyntaxTable;

pub const HLCPP: &str = "hlcpp";
pub const REGEX: &str = "regex";
pub const EXPAND_TABS: &str = "expand_tabs";
pub const NUMBER_LINES: &str = "number_lines";
pub const HIGHLIGHT_SELECTIONS: &str = "highlight_selections";

/// Register every built-in factory.
pub fn register_builtins(registry: &mut FilterRegistry, cplusplus: &Arc<SyntaxTable>) {
    let table = Arc::clone(cplusplus);
    registry.register(HLCPP, move |_ctx: &FilterContext, params: &FilterParameters| {
        params.expect_only(HLCPP, &[])?;
        Ok(Box::new(colorize::SyntaxHighlighter::new(HLCPP, Arc::clone(&table))) as Box<dyn Filter>)
    });

    registry.register(REGEX, |_ctx: &FilterContext, params: &FilterParameters| {
        Ok(Box::new(colorize::RegexHighlighter::from_params(params)?) as Box<dyn Filter>)
    });

    registry.register(EXPAND_TABS, |_ctx: &FilterContext, params: &FilterParameters| {
        Ok(Box::new(tabs::TabExpander::from_params(params)?) as Box<dyn Filter>)
    });

    registry.register(NUMBER_LINES, |_ctx: &FilterContext, params: &FilterParameters| {
        params.expect_only(NUMBER_LINES, &[])?;
        Ok(Box::new(numbers::LineNumbers) as Box<dyn Filter>)
    });

    registry.register(HIGHLIGHT_SELECTIONS, |ctx: &FilterContext, params: &FilterParameters| {
        params.expect_only(HIGHLIGHT_SELECTIONS, &[])?;
        Ok(Box::new(selections::SelectionHighlighter::new(Rc::clone(&ctx.selections))) as Box<dyn Filter>)
    });
}
