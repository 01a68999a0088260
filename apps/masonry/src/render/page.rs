use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::models::Post;

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #111; color: #eee; }
.container { display: flex; gap: 12px; padding: 12px; align-items: flex-start; }
.column { flex: 1; display: flex; flex-direction: column; gap: 12px; min-width: 0; }
.post { position: relative; border-radius: 8px; overflow: hidden; }
.post img { display: block; width: 100%; height: auto; }
.overlay { position: absolute; inset: auto 0 0 0; padding: 8px 12px; background: linear-gradient(transparent, rgba(0,0,0,.75)); opacity: 0; transition: opacity .2s; }
.post:hover .overlay { opacity: 1; }
.overlay h3 { margin: 0; font-size: 14px; font-weight: 500; }
.load-more { display: flex; justify-content: center; padding: 24px; }
.load-more-button { padding: 10px 24px; border: 0; border-radius: 6px; font-size: 15px; cursor: pointer; }
"#;

// Reports the viewport width and reloads when the server re-laid the grid.
const VIEWPORT_SCRIPT: &str = r#"
function reportViewport() {
  fetch("/api/v1/grid/viewport", {
    method: "POST",
    headers: { "content-type": "application/json" },
    body: JSON.stringify({ width: window.innerWidth })
  })
    .then(r => r.json())
    .then(body => { if (body.resized) window.location.reload(); })
    .catch(err => console.error("viewport report failed", err));
}
window.addEventListener("resize", reportViewport);
reportViewport();
"#;

/// Renders the full grid page: `div.container > div.column > div.post`.
pub fn render_page(columns: &[Vec<Post>]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Masonry Grid" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                (render_columns(columns))
                form.load-more method="post" action="/load-more" {
                    button.load-more-button type="submit" { "Load more" }
                }
                script { (PreEscaped(VIEWPORT_SCRIPT)) }
            }
        }
    }
}

fn render_columns(columns: &[Vec<Post>]) -> Markup {
    html! {
        div.container {
            @for column in columns {
                div.column {
                    @for post in column {
                        div.post {
                            img src=(post.image) alt=(post.title) loading="lazy";
                            div.overlay {
                                h3 { (post.title) }
                            }
                        }
                    }
                }
            }
        }
    }
}
