/// Registered under an `.html` name so minijinja auto-escapes text values.
pub const INDEX_TEMPLATE_NAME: &str = "index.html";

pub const INDEX_TEMPLATE: &str = include_str!("../assets/index.html.j2");
