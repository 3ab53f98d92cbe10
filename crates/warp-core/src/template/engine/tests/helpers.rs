//! Shared test helpers for template engine tests

use crate::template::engine::{render, Rendered, TemplateContext};
use crate::vars::VariableStore;

/// Variables of a typical python project with docker enabled
pub(super) fn project_vars() -> VariableStore {
    VariableStore::load(
        "PROJECT_NAME=demo\n\
         PROJECT_TYPE=python\n\
         AUTHOR_NAME=Jane Doe\n\
         USE_DOCKER=true\n\
         INCLUDE_TESTING=false\n",
    )
}

/// Render with the default engine and no includes
pub(super) fn render_with(template: &str, vars: &VariableStore) -> Rendered {
    render(template, &TemplateContext::new(vars))
}

/// Render with `project_vars()` and return only the output
pub(super) fn render_output(template: &str) -> String {
    render_with(template, &project_vars()).output
}
