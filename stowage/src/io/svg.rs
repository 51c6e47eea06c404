use itertools::Itertools;
use svg::Document;
use svg::node::element::{Group, Rectangle, Text, Title};

use crate::entities::{ContainerSets, PlacementName};

/// Top view of one physical container instance.
/// Boxes are drawn from low to high top face and shaded darker the higher they reach.
/// Returns `None` if nothing was packed in `placement`.
pub fn placement_to_svg(cs: &ContainerSets, placement: &PlacementName) -> Option<Document> {
    let packed = cs.placements().get(placement)?;
    let container = cs.instance().container(placement.container_id);
    let (dx, dy, dz) = (
        container.dims.dx as f32,
        container.dims.dy as f32,
        container.dims.dz as f32,
    );

    let margin = 0.1 * f32::max(dx, dy);
    let font_size = 0.025 * f32::max(dx, dy);
    let stroke_width = 0.002 * f32::max(dx, dy);

    let utilization = packed.iter().map(|pi| pi.dims.volume()).sum::<u64>() as f32
        / container.volume() as f32;

    let label = Text::new(format!(
        "{} | {}x{}x{} | {} boxes | utilization: {:.3}%",
        cs.placement_label(placement),
        container.dims.dx,
        container.dims.dy,
        container.dims.dz,
        packed.len(),
        utilization * 100.0
    ))
    .set("x", 0.0)
    .set("y", -0.5 * font_size)
    .set("font-size", font_size)
    .set("font-family", "monospace")
    .set("font-weight", "500");

    let container_rect = Rectangle::new()
        .set("x", 0.0)
        .set("y", 0.0)
        .set("width", dx)
        .set("height", dy)
        .set("fill", "#CC824A")
        .set("stroke", "black")
        .set("stroke-width", 2.0 * stroke_width);

    let items_group = packed
        .iter()
        .sorted_by_key(|pi| pi.top())
        .fold(Group::new().set("id", "items"), |group, pi| {
            let (x, y, z) = pi.position;
            let lightness = 85.0 - 50.0 * (pi.top() as f32 / dz);
            let rect = Rectangle::new()
                .set("x", x as f32)
                .set("y", y as f32)
                .set("width", pi.dims.dx as f32)
                .set("height", pi.dims.dy as f32)
                .set("fill", format!("hsl(30, 35%, {lightness:.1}%)"))
                .set("fill-opacity", 0.9)
                .set("stroke", "black")
                .set("stroke-width", stroke_width)
                .add(Title::new(format!(
                    "{} | {} | z: {z}..{}",
                    pi.item.name,
                    pi.rotation,
                    pi.top()
                )));
            let text = Text::new(format!("{} z{z}", pi.item.name))
                .set("x", x as f32 + 0.5 * pi.dims.dx as f32)
                .set("y", y as f32 + 0.5 * pi.dims.dy as f32)
                .set("font-size", 0.6 * font_size)
                .set("font-family", "monospace")
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle");
            group.add(rect).add(text)
        });

    let document = Document::new()
        .set(
            "viewBox",
            (-margin, -margin - font_size, dx + 2.0 * margin, dy + 2.0 * margin + font_size),
        )
        .add(label)
        .add(container_rect)
        .add(items_group);

    Some(document)
}
