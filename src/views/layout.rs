use maud::{html, Markup, PreEscaped, DOCTYPE};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 42rem; margin: 0 auto; padding: 1rem; background: #fff5f7; color: #3a2a30; }
header nav { display: flex; justify-content: space-between; align-items: center; }
a { color: #c2185b; }
article { background: #fff; border-radius: 12px; padding: 1.25rem; box-shadow: 0 2px 8px rgba(194, 24, 91, 0.12); margin: 1rem 0; }
.progress { background: #f8d7e3; border-radius: 8px; height: 0.6rem; overflow: hidden; }
.progress-bar { background: #c2185b; height: 100%; }
.option-label { display: block; padding: 0.6rem; margin: 0.4rem 0; border: 1px solid #f1c1d3; border-radius: 8px; cursor: pointer; }
.error { color: #b00020; font-weight: 600; }
.message-en { color: #6d4c5a; }
button, .button { background: #c2185b; color: #fff; border: none; border-radius: 8px; padding: 0.6rem 1.2rem; cursor: pointer; text-decoration: none; }
table { width: 100%; border-collapse: collapse; }
td, th { padding: 0.4rem; border-bottom: 1px solid #f1c1d3; text-align: start; }
"#;

fn header() -> Markup {
    html! {
        header {
            nav {
                a href="/" { strong { "♥️" } }
                small { (VERSION) }
            }
        }
    }
}

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ar" dir="rtl" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                (header())
                main { (body) }
            }
        }
    }
}

pub fn error_message(error: Option<&str>) -> Markup {
    html! {
        @if let Some(error) = error {
            p.error role="alert" { (error) }
        }
    }
}
