//! JavaScript evaluated inside rendered pages.

/// Reports `document.readyState`.
pub const READY_STATE_SCRIPT: &str = "document.readyState";

/// Number of resources the page has requested so far.
pub const RESOURCE_COUNT_SCRIPT: &str = "performance.getEntriesByType('resource').length";

/// Quote a value as a JavaScript string literal.
fn js_string(value: &str) -> String {
    // JSON string syntax is valid JavaScript.
    serde_json::Value::String(value.to_string()).to_string()
}

fn js_array(selectors: &[&str]) -> String {
    selectors
        .iter()
        .map(|s| js_string(s))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generate JavaScript that returns the trimmed text of the first selector
/// matching a non-empty element, or `''`.
///
/// Invalid selectors are skipped instead of aborting the whole list.
pub fn query_text_script(selectors: &[&str]) -> String {
    let selectors = js_array(selectors);

    format!(
        r#"
        (() => {{
            const selectors = [{selectors}];
            for (const selector of selectors) {{
                let element = null;
                try {{
                    element = document.querySelector(selector);
                }} catch (_) {{
                    continue;
                }}
                if (!element) continue;
                const text = (element.innerText || element.textContent || '').trim();
                if (text.length > 0) return text;
            }}
            return '';
        }})()
        "#
    )
}

/// Generate JavaScript that returns an attribute of the first selector whose
/// element carries a non-empty value for it, or `''`.
pub fn query_attribute_script(selectors: &[&str], attribute: &str) -> String {
    let selectors = js_array(selectors);
    let attribute = js_string(attribute);

    format!(
        r#"
        (() => {{
            const selectors = [{selectors}];
            const attribute = {attribute};
            for (const selector of selectors) {{
                let elements = [];
                try {{
                    elements = document.querySelectorAll(selector);
                }} catch (_) {{
                    continue;
                }}
                for (const element of elements) {{
                    const value = (element.getAttribute(attribute) || '').trim();
                    if (value.length > 0) return value;
                }}
            }}
            return '';
        }})()
        "#
    )
}
