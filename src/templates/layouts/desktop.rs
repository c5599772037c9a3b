use maud::{html, Markup, DOCTYPE};

const STYLES: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f9fafb;color:#111827}\
header.top{display:flex;align-items:center;justify-content:space-between;padding:1rem 1.5rem;border-bottom:1px solid #e5e7eb;background:#fff}\
main{max-width:1200px;margin:0 auto;padding:2rem 1rem}\
.layout{display:grid;grid-template-columns:1fr 3fr;gap:1.5rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:1.5rem}\
.card{background:#fff;border-radius:.5rem;box-shadow:0 1px 3px rgba(0,0,0,.1);padding:1rem}\
.card-image img{width:100%;height:12rem;object-fit:cover}\
.filters form{display:flex;flex-direction:column;gap:.5rem}\
.badge{border-radius:9999px;padding:.1rem .6rem;font-size:.75rem}\
.notice{text-align:center;padding:2rem;border-radius:.5rem}\
.notice.error{background:#fef2f2;color:#991b1b}";

pub fn desktop_layout(title: &str, user_menu: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content="Discover hackathons from Unstop, Devfolio, and Devpost all in one place.";
                title { (title) }
                style { (STYLES) }
            }
            body {
                header class="top" {
                    a href="/" class="brand" { h1 { "HackRadar" } }
                    (user_menu)
                }
                (content)
            }
        }
    }
}
