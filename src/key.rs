/// Placeholder token for `name`, e.g. `${name}`.
pub fn placeholder(name: &str) -> String {
    format!("${{{name}}}")
}

/// The pair of delimiters enclosing a conditional block, `<name>` and `</name>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockTags {
    pub initial: String,
    pub end: String,
}

impl BlockTags {
    pub fn new(name: &str) -> Self {
        Self {
            initial: format!("<{name}>"),
            end: format!("</{name}>"),
        }
    }
}
