use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::services::format::format_amount;
use crate::state::{ChartData, ChartSlice};

const CANVAS_SIZE: u32 = 420;
/// Angular resolution of sector outlines, in radians
const ARC_STEP: f64 = 0.03;

const PALETTE: [RGBColor; 8] = [
    RGBColor(102, 126, 234),
    RGBColor(240, 147, 251),
    RGBColor(255, 154, 158),
    RGBColor(72, 187, 120),
    RGBColor(246, 173, 85),
    RGBColor(79, 209, 197),
    RGBColor(196, 113, 237),
    RGBColor(160, 174, 192),
];

#[derive(Properties, PartialEq)]
pub struct ExpenseChartProps {
    pub chart: ChartData,
    pub loading: bool,
    /// Currency used for sector labels
    pub currency: AttrValue,
}

pub struct ExpenseChart {
    canvas_ref: NodeRef,
}

impl Component for ExpenseChart {
    type Message = ();
    type Properties = ExpenseChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw_chart(ctx.props());
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let slices = props.chart.slices();

        html! {
            <div class="rust-chart-container">
                <div class="chart-title-header">
                    <h3 class="chart-title">{&props.chart.title}</h3>
                </div>

                {if props.loading {
                    html! {
                        <div class="chart-loading">
                            <div class="loading-spinner"></div>
                            <p>{"Loading chart data..."}</p>
                        </div>
                    }
                } else {
                    html! {}
                }}

                {if slices.is_empty() {
                    html! {
                        <div class="chart-empty">
                            <p>{"No expenses recorded for this month"}</p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="chart-content">
                            <canvas
                                ref={self.canvas_ref.clone()}
                                class="rust-chart-canvas"
                                width={CANVAS_SIZE.to_string()}
                                height={CANVAS_SIZE.to_string()}
                            ></canvas>
                            <ul class="chart-legend">
                                {for slices.iter().enumerate().map(|(index, slice)| {
                                    let color = palette(index);
                                    html! {
                                        <li>
                                            <span
                                                class="legend-swatch"
                                                style={format!("background: rgb({}, {}, {});", color.0, color.1, color.2)}
                                            ></span>
                                            {format!(
                                                "{}: {} ({:.0}%)",
                                                slice.expense_type,
                                                format_amount(&props.currency, slice.amount),
                                                slice.share * 100.0
                                            )}
                                        </li>
                                    }
                                })}
                            </ul>
                        </div>
                    }
                }}
            </div>
        }
    }
}

impl ExpenseChart {
    fn draw_chart(&self, props: &ExpenseChartProps) {
        let slices = props.chart.slices();
        if slices.is_empty() {
            return;
        }

        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };
        canvas.set_width(CANVAS_SIZE);
        canvas.set_height(CANVAS_SIZE);

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };
        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let center = (CANVAS_SIZE as i32 / 2, CANVAS_SIZE as i32 / 2);
        let radius = CANVAS_SIZE as f64 * 0.4;
        let label_style = ("sans-serif", 13)
            .into_font()
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));

        for (index, slice) in slices.iter().enumerate() {
            let outline = sector_points(center, radius, slice);
            if root
                .draw(&Polygon::new(outline, palette(index).filled()))
                .is_err()
            {
                return;
            }
        }

        // Labels go on top of every sector
        for slice in &slices {
            // too thin to hold a label
            if slice.share < 0.04 {
                continue;
            }
            let anchor = polar(center, radius * 0.62, slice.mid_angle());
            let label = format_amount(&props.currency, slice.amount);
            if root.draw(&Text::new(label, anchor, label_style.clone())).is_err() {
                return;
            }
        }

        let _ = root.present();
    }
}

fn palette(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Point at `angle` radians clockwise from 12 o'clock
fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.sin()).round() as i32,
        center.1 - (radius * angle.cos()).round() as i32,
    )
}

/// Closed outline of a pie sector: the center followed by points along its arc
fn sector_points(center: (i32, i32), radius: f64, slice: &ChartSlice) -> Vec<(i32, i32)> {
    let steps = ((slice.sweep / ARC_STEP).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = slice.start_angle + slice.sweep * step as f64 / steps as f64;
        points.push(polar(center, radius, angle));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn slice(start_angle: f64, sweep: f64) -> ChartSlice {
        ChartSlice {
            expense_type: "Food".to_string(),
            amount: 1.0,
            share: sweep / TAU,
            start_angle,
            sweep,
        }
    }

    #[test]
    fn test_polar_starts_at_twelve_and_runs_clockwise() {
        let center = (100, 100);
        assert_eq!(polar(center, 50.0, 0.0), (100, 50));
        assert_eq!(polar(center, 50.0, FRAC_PI_2), (150, 100));
        assert_eq!(polar(center, 50.0, PI), (100, 150));
    }

    #[test]
    fn test_sector_points_span_the_arc() {
        let center = (100, 100);
        let points = sector_points(center, 50.0, &slice(0.0, FRAC_PI_2));

        assert_eq!(points[0], center);
        assert_eq!(points[1], (100, 50));
        assert_eq!(*points.last().unwrap(), (150, 100));
        assert!(points.len() > 10);
    }

    #[test]
    fn test_tiny_sector_still_has_an_arc() {
        let points = sector_points((0, 0), 10.0, &slice(1.0, 0.0001));
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette(0), palette(PALETTE.len()));
    }
}
