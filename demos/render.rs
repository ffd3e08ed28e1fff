use asciivec::{Alignment, Element, Shape};
use tracing_subscriber::EnvFilter;

fn path_data(shape: &Shape) -> String {
    let mut d = String::new();
    for element in shape.elements() {
        let step = match *element {
            Element::Move(p) => format!("M{},{} ", p.x, p.y),
            Element::Line(p) => format!("L{},{} ", p.x, p.y),
            Element::Arc { ctrl, to } => format!("Q{},{} {},{} ", ctrl.x, ctrl.y, to.x, to.y),
        };
        d.push_str(&step);
    }
    if shape.closed {
        d.push('Z');
    }
    d.trim_end().to_string()
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| miette::miette!("failed to read {path}: {e}"))?,
        None => ["+-------+", "| cBLU  |-->  done", "| hello |", "+-------+"].join("\n"),
    };

    let scene = asciivec::asciivec(&input)?;
    tracing::info!(
        outer = scene.outer.len(),
        inner = scene.inner.len(),
        lines = scene.lines.len(),
        "scene ready"
    );

    for shape in &scene.outer {
        println!("outer  {}", path_data(shape));
    }
    for shape in &scene.inner {
        let fill = shape.fill.map(|c| c.to_string()).unwrap_or_else(|| "none".into());
        println!("inner  {} fill={fill}", path_data(shape));
    }
    for line in &scene.lines {
        let dash = if line.dashed { " dashed" } else { "" };
        println!("line   {} {:?}{dash}", path_data(line), line.style);
    }
    for (pos, mark) in &scene.marks {
        println!("mark   {pos} {mark:?}");
    }
    for paragraph in &scene.paragraphs {
        let align = match paragraph.alignment() {
            Some(Alignment::Left) => "left",
            Some(Alignment::Right) => "right",
            Some(Alignment::Center) => "center",
            None => "-",
        };
        let rows: Vec<&str> = paragraph.rows().iter().map(|r| r.text.as_str()).collect();
        println!(
            "text   ({},{}) {align} {:?}",
            paragraph.left(),
            paragraph.top(),
            rows
        );
    }
    Ok(())
}
