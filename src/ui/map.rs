//! Map background rendering

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Paragraph,
    },
};

use crate::map::MapViewState;
use crate::theme::{BG_MAP, BG_MAP_PLACEHOLDER, BRAND_BLUE, MAP_OUTLINE, TEXT_MUTED};

/// Draw a map view behind a screen. Failed views draw nothing so the
/// screen's own background shows through.
pub fn render_map_background(frame: &mut Frame, area: Rect, state: MapViewState) {
    match state {
        MapViewState::Hidden => {}
        MapViewState::Placeholder => {
            let block = Block::default().style(Style::default().bg(BG_MAP_PLACEHOLDER));
            frame.render_widget(block, area);

            if area.height > 2 {
                let label_area = Rect {
                    x: area.x,
                    y: area.y + area.height - 2,
                    width: area.width,
                    height: 1,
                };
                let label = Paragraph::new("Loading map...")
                    .style(Style::default().fg(TEXT_MUTED))
                    .alignment(Alignment::Center);
                frame.render_widget(label, label_area);
            }
        }
        MapViewState::Ready(viewport) => {
            let (x_bounds, y_bounds) = viewport.bounds();
            let center = viewport.center;
            let canvas = Canvas::default()
                .background_color(BG_MAP)
                .marker(Marker::Braille)
                .x_bounds(x_bounds)
                .y_bounds(y_bounds)
                .paint(move |ctx| {
                    ctx.draw(&Map {
                        color: MAP_OUTLINE,
                        resolution: MapResolution::High,
                    });
                    ctx.layer();
                    ctx.print(
                        center.lng,
                        center.lat,
                        Span::styled("●", Style::default().fg(BRAND_BLUE)),
                    );
                });
            frame.render_widget(canvas, area);
        }
    }
}
