use std::collections::HashMap;

/// Page body sent when creating a group document
pub const GROUP_TEMPLATE: &str = include_str!("../../templates/group.xml");

/// Substitute `${key}` placeholders in a template.
///
/// Placeholders without a matching parameter are left untouched.
pub fn render_template(template: &str, params: &HashMap<&str, String>) -> String {
    params
        .iter()
        .fold(template.to_string(), |rendered, (key, value)| {
            rendered.replace(&format!("${{{}}}", key), value)
        })
}

/// XML body for a create-group request
pub fn group_xml(params: &HashMap<&str, String>) -> String {
    render_template(GROUP_TEMPLATE, params)
}
