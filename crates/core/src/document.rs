//! Self-contained HTML documents handed to the display sink. Everything is
//! inline (styles, icon) so a document renders without any further fetch.

const SHARED_STYLE: &str = r#"  :root { color-scheme: dark; }
  body {
    margin: 0; min-height: 100vh; display: grid; place-items: center;
    font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Ubuntu, Cantarell, Noto Sans, Arial;
    background: radial-gradient(1200px 600px at 10% -20%, #11203a 0%, #0b1220 60%), #0b1220; color: #e6eefc;
  }
  .card {
    background: linear-gradient(180deg, rgba(109,40,217,0.14), rgba(59,130,246,0.1)), #111a2b;
    border: 1px solid rgba(148,163,184,0.18);
    border-radius: 16px; box-shadow: 0 10px 30px rgba(0,0,0,0.35);
  }"#;

const ADDITION_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Addition Result</title>
<style>
%STYLE%
  .card { width: min(560px, 92vw); padding: 20px 22px; }
  .title {
    display: flex; gap: 8px; align-items: center; margin: 2px 0 14px 0;
    font-size: 16px; color: #9bb0d3; letter-spacing: 0.3px;
  }
  .result {
    display: flex; align-items: center; justify-content: center;
    font-size: clamp(32px, 6vw, 48px); font-weight: 800; margin: 6px 0 10px 0;
    background: linear-gradient(90deg, #6ee7ff, #a78bfa); -webkit-background-clip: text; background-clip: text; color: transparent;
  }
  .pills { display: flex; gap: 10px; justify-content: center; color: #9bb0d3; font-size: 14px; }
  .pill { border: 1px solid rgba(148,163,184,0.24); border-radius: 999px; padding: 6px 10px; background: rgba(2,6,23,0.28); }
  .pill--sum { color: #10b981; font-weight: 600; }
</style>
<div class="card">
  <div class="title">
    <svg width="18" height="18" viewBox="0 0 24 24" fill="none" aria-hidden="true">
      <path d="M12 5v14M5 12h14" stroke="currentColor" stroke-width="2" stroke-linecap="round" />
    </svg>
    Simple addition result
  </div>
  <div class="result">%A% + %B% = %SUM%</div>
  <div class="pills">
    <span class="pill">a = %A%</span>
    <span class="pill">b = %B%</span>
    <span class="pill pill--sum">sum = %SUM%</span>
  </div>
</div>
</html>"#;

/// Fixed help page shown whenever a query could not be turned into anything
/// more specific.
pub const HELP_DOCUMENT: &str = r#"<!doctype html>
<html lang="en">
<meta charset="utf-8">
<title>Web View</title>
<style>
  :root { color-scheme: dark; }
  body {
    margin: 0; min-height: 100vh; display: grid; place-items: center;
    font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Ubuntu, Cantarell, Noto Sans, Arial;
    background: radial-gradient(1200px 600px at 10% -20%, #11203a 0%, #0b1220 60%), #0b1220; color: #e6eefc;
    padding: 24px; text-align: center;
  }
  .box {
    width: min(620px, 92vw); padding: 22px;
    background: linear-gradient(180deg, rgba(109,40,217,0.14), rgba(59,130,246,0.1)), #111a2b;
    border: 1px solid rgba(148,163,184,0.18);
    border-radius: 16px; box-shadow: 0 10px 30px rgba(0,0,0,0.35);
  }
  code { color: #a5b4fc }
</style>
<div class="box">
  <h2>Enter a query</h2>
  <p>Try queries like:</p>
  <p><code>who is 'sachin tendulkar'</code> or <code>add 300 and 200</code></p>
</div>
</html>"#;

/// Renders the addition card. Output depends only on the three numbers.
pub fn render_addition_document(a: f64, b: f64, sum: f64) -> String {
    ADDITION_TEMPLATE
        .replace("%STYLE%", SHARED_STYLE)
        .replace("%A%", &format_number(a))
        .replace("%B%", &format_number(b))
        .replace("%SUM%", &format_number(sum))
}

/// Formats a number the way browsers print them: no trailing `.0`, no
/// negative zero, exponent form outside `[1e-6, 1e21)`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", value);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }

    format!("{}", value)
}
