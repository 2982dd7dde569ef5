//! SVG export for recorded scenes.

use flexpage_core::{BorderStyle, Color};
use flexpage_render::{LinePrimitive, RectPrimitive, RenderCommand, Scene, TextPrimitive};

/// Serialize everything recorded in `scene` as an SVG document.
pub fn export(scene: &Scene) -> String {
    let size = scene.size();
    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
"#,
        size.width, size.height, size.width, size.height
    ));

    for command in &scene.commands {
        svg.push_str("  ");
        match command {
            RenderCommand::Rect(rect) => write_rect(&mut svg, rect),
            RenderCommand::Line(line) => write_line(&mut svg, line),
            RenderCommand::Text(text) => write_text(&mut svg, text),
        }
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_rect(svg: &mut String, prim: &RectPrimitive) {
    let r = prim.rect;
    svg.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
        r.x,
        r.y,
        r.width,
        r.height,
        paint("fill", prim.fill)
    ));
}

fn write_line(svg: &mut String, prim: &LinePrimitive) {
    svg.push_str(&format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-width="{}""#,
        prim.from.x,
        prim.from.y,
        prim.to.x,
        prim.to.y,
        paint("stroke", prim.color),
        prim.width
    ));
    if let Some([on, off]) = prim.style.dash_pattern(prim.width) {
        svg.push_str(&format!(r#" stroke-dasharray="{} {}""#, on, off));
    }
    if prim.style == BorderStyle::Dotted {
        svg.push_str(r#" stroke-linecap="round""#);
    }
    svg.push_str("/>");
}

fn write_text(svg: &mut String, prim: &TextPrimitive) {
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}"{}>{}</text>"#,
        prim.cell.x,
        prim.cell.y + prim.baseline,
        escape(&prim.font_family),
        prim.font_size,
        paint("fill", prim.color),
        escape(&prim.text)
    ));
}

/// Color attribute plus an opacity attribute when not opaque.
fn paint(attr: &str, color: Color) -> String {
    let (r, g, b, _) = color.to_rgba8();
    let mut out = format!(r#" {}="rgb({},{},{})""#, attr, r, g, b);
    if !color.is_opaque() {
        out.push_str(&format!(r#" {}-opacity="{}""#, attr, color.a));
    }
    out
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexpage_core::{Border, Size};
    use flexpage_layout::{draw_page, FlexBox, Run, Text};
    use flexpage_render::FixedMetrics;

    fn scene() -> Scene {
        Scene::new(200.0, 100.0).with_font("Helvetica", FixedMetrics::new(0.5))
    }

    #[test]
    fn test_export_empty_scene() {
        let svg = export(&scene());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 200 100""#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_export_layout() {
        let mut scene = scene();
        let root = FlexBox::row(vec![Text::new(vec![
            Run::new("a < b").with_color(Color::from_hex("#FF0000").unwrap())
        ])
        .boxed()])
        .with_background_color(Color::rgba(0.0, 0.0, 1.0, 0.5))
        .with_border(Border::uniformed(Color::BLACK, BorderStyle::Dotted, 2.0));
        draw_page(&root, &mut scene, Size::new(200.0, 100.0)).unwrap();

        let svg = export(&scene);
        assert!(svg.contains(r#"fill="rgb(0,0,255)" fill-opacity="0.5""#));
        assert!(svg.contains("a &lt; b"));
        assert!(svg.contains(r#"fill="rgb(255,0,0)""#));
        assert!(svg.contains(r#"stroke-dasharray="0 4""#));
        assert_eq!(svg.matches("<line").count(), 4);
    }
}
