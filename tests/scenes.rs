use asciivec::{Element, Scene, Shape, asciivec};

fn path(shape: &Shape) -> String {
    let mut parts: Vec<String> = shape
        .elements()
        .iter()
        .map(|e| match *e {
            Element::Move(p) => format!("M{},{}", p.x, p.y),
            Element::Line(p) => format!("L{},{}", p.x, p.y),
            Element::Arc { ctrl, to } => format!("Q{},{} {},{}", ctrl.x, ctrl.y, to.x, to.y),
        })
        .collect();
    if shape.closed {
        parts.push("Z".into());
    }
    parts.join(" ")
}

/// Scene summary without stroke paths.
fn dump(scene: &Scene) -> String {
    let mut out = Vec::new();
    for shape in &scene.inner {
        out.push(format!("inner {}", path(shape)));
    }
    for shape in &scene.outer {
        out.push(format!("outer {}", path(shape)));
    }
    for (pos, mark) in &scene.marks {
        out.push(format!("mark {pos} {mark:?}"));
    }
    for p in &scene.paragraphs {
        let rows: Vec<&str> = p.rows().iter().map(|r| r.text.as_str()).collect();
        out.push(format!(
            "text ({},{}) {:?} {}",
            p.left(),
            p.top(),
            p.alignment(),
            rows.join(" / ")
        ));
    }
    out.join("\n")
}

#[test]
fn labeled_box() {
    let scene = asciivec("+-------+\n| hello |\n+-------+").unwrap();
    insta::assert_snapshot!(dump(&scene), @r"
    inner M0,0 L16,0 L16,4 L0,4 L0,0 Z
    text (2,1) Some(Left) hello
    ");
}

#[test]
fn arrow_line() {
    let scene = asciivec("-->").unwrap();
    assert_eq!(scene.lines.len(), 1);
    insta::assert_snapshot!(path(&scene.lines[0]), @"M-1,0 L4,0");
    insta::assert_snapshot!(dump(&scene), @"mark (4, 0) ArrowRight");
}

#[test]
fn two_paragraphs() {
    let scene = asciivec("Hello\nWorld\n\n  right\naligned").unwrap();
    insta::assert_snapshot!(dump(&scene), @r"
    text (0,0) Some(Left) Hello / World
    text (0,3) Some(Right) right / aligned
    ");
}
