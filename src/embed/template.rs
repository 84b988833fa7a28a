//! Typed embedded templates.

use std::marker::PhantomData;

/// Variable set a template or asset is rendered with.
///
/// `hash_input` feeds the asset fingerprint so URLs change when injected
/// values do; variable-free assets keep the default empty input.
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;

    fn hash_input(&self) -> String {
        String::new()
    }
}

/// Marker for templates and assets that take no variables.
pub struct NoVars;

impl TemplateVars for NoVars {
    fn apply(&self, content: &str) -> String {
        content.to_string()
    }
}

/// A compile-time embedded text template typed by its variable set.
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}
