//! Reference display sink: a host page that frames the resolved reference in
//! a sandboxed iframe. The sandbox never grants top-level navigation, so
//! framed content cannot move the host page.

pub const IFRAME_SANDBOX: &str =
    "allow-scripts allow-forms allow-pointer-lock allow-popups allow-same-origin";
pub const IFRAME_REFERRER_POLICY: &str = "no-referrer";
pub const VIEW_CONTENT_SECURITY_POLICY: &str = "default-src 'none'; style-src 'unsafe-inline'; \
     frame-src http: https: data:; frame-ancestors 'self'; base-uri 'none'; form-action 'none'";

pub fn render_view_page(href: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Viewport</title>
<style>
  :root {{ color-scheme: dark; }}
  body {{
    margin: 0; min-height: 100vh; display: grid; place-items: center; padding: 24px; box-sizing: border-box;
    background: radial-gradient(1200px 600px at 10% -20%, #11203a 0%, #0b1220 60%), #0b1220;
  }}
  .frame {{
    width: min(900px, 96vw); height: min(460px, 78vh); overflow: hidden;
    background: linear-gradient(180deg, rgba(109,40,217,0.14), rgba(59,130,246,0.1)), #111a2b;
    border: 1px solid rgba(148,163,184,0.18); border-radius: 16px; box-shadow: 0 10px 30px rgba(0,0,0,0.35);
  }}
  iframe {{ width: 100%; height: 100%; border: none; }}
</style>
<div class="frame">
  <iframe title="Embedded Webpage" src="{src}" sandbox="{sandbox}" referrerpolicy="{referrer}"></iframe>
</div>
</html>"#,
        src = escape_attr(href),
        sandbox = IFRAME_SANDBOX,
        referrer = IFRAME_REFERRER_POLICY,
    )
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
