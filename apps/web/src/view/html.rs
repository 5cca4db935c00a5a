use super::{Action, Element, Node};

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

// Re-renders the page whenever the server reports a newer revision than the one the
// page was built at.
const LIVE_RELOAD_SCRIPT: &str = "const since = document.body.dataset.revision;\n\
new EventSource('/events?since=' + since).onmessage = () => window.location.reload();";

impl Node {
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out);
        out
    }
}

/// Wraps a rendered body in a complete HTML document.
pub fn document(title: &str, revision: u64, body: &Node) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{}</title>\n</head>\n<body data-revision=\"{revision}\">\n{}\n<script>\n{}\n</script>\n</body>\n</html>\n",
        escape(title),
        body.render_html(),
        LIVE_RELOAD_SCRIPT,
    )
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(&escape(t)),
        Node::Element(e) => match &e.action {
            Some(action) => write_action(e, action, out),
            None => write_element(e.tag, &e.attrs, &e.children, out),
        },
    }
}

fn write_element(tag: &str, attrs: &[(String, String)], children: &[Node], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        write_attr(name, value, out);
    }
    out.push('>');

    if VOID_TAGS.contains(&tag) {
        return;
    }

    for child in children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// A click control becomes a submit button inside its own POST form.
fn write_action(element: &Element, action: &Action, out: &mut String) {
    out.push_str("<form method=\"post\"");
    write_attr("action", action.path(), out);
    out.push('>');

    for (name, value) in action.fields() {
        out.push_str("<input type=\"hidden\"");
        write_attr("name", name, out);
        write_attr("value", value, out);
        out.push('>');
    }

    let mut attrs = vec![("type".to_string(), "submit".to_string())];
    attrs.extend(element.attrs.iter().filter(|(n, _)| n != "type").cloned());
    write_element("button", &attrs, &element.children, out);

    out.push_str("</form>");
}

fn write_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
