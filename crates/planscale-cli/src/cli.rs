//! Argument parsing and report formatting.

use planscale_core::entities::format_quantity;
use planscale_core::{FurnitureLibrary, FurnitureTemplate, ProjectData, ScaleBar};
use std::fmt::Write as _;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage:
  planscale inspect <project.json>
  planscale migrate <input.json> <output.json>
  planscale scalebar <scale> <unit> [zoom]
  planscale templates [query]

Set RUST_LOG=debug for more output.";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Inspect { path: PathBuf },
    Migrate { input: PathBuf, output: PathBuf },
    ScaleBar { scale: f64, unit: String, zoom: f64 },
    Templates { query: Option<String> },
    Help,
}

fn parse_number(name: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| format!("invalid {name} value: {value}"))
}

/// Parse arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let rest = args.get(1..).unwrap_or_default();

    match args.first().map(String::as_str) {
        None | Some("help" | "--help" | "-h") => Ok(Command::Help),
        Some("inspect") => match rest {
            [path] => Ok(Command::Inspect { path: PathBuf::from(path) }),
            _ => Err("inspect takes exactly one file".to_string()),
        },
        Some("migrate") => match rest {
            [input, output] => Ok(Command::Migrate {
                input: PathBuf::from(input),
                output: PathBuf::from(output),
            }),
            _ => Err("migrate takes an input and an output file".to_string()),
        },
        Some("scalebar") => match rest {
            [scale, unit] | [scale, unit, _] => {
                let zoom = match rest.get(2) {
                    Some(zoom) => parse_number("zoom", zoom)?,
                    None => 1.0,
                };
                Ok(Command::ScaleBar {
                    scale: parse_number("scale", scale)?,
                    unit: unit.clone(),
                    zoom,
                })
            }
            _ => Err("scalebar takes a scale, a unit and an optional zoom".to_string()),
        },
        Some("templates") => match rest {
            [] => Ok(Command::Templates { query: None }),
            [query] => Ok(Command::Templates { query: Some(query.clone()) }),
            _ => Err("templates takes at most one query".to_string()),
        },
        Some(other) => Err(format!("unknown command: {other}")),
    }
}

/// Human-readable summary of a project.
pub fn project_report(project: &ProjectData) -> String {
    let mut out = String::new();
    match project.scale {
        Some(scale) => {
            let _ = writeln!(out, "Scale: {:.4} px/{}", scale, project.unit);
        }
        None => {
            let _ = writeln!(out, "Scale: not calibrated (unit {})", project.unit);
        }
    }

    let _ = writeln!(out, "Lines ({}):", project.lines.len());
    for line in &project.lines {
        let length = line.length_label().unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "  {}: {}", line.name, length);
    }

    let _ = writeln!(out, "Areas ({}):", project.polygons.len());
    for polygon in &project.polygons {
        let area = polygon.area_label().unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "  {}: {}", polygon.name, area);
    }

    let _ = writeln!(out, "Furniture ({}):", project.furniture.len());
    for item in &project.furniture {
        let _ = writeln!(
            out,
            "  {} [{}]: {:.2} x {:.2} m, {}°",
            item.name, item.template_id, item.width, item.depth, item.rotation
        );
    }

    let _ = writeln!(out, "Annotations ({}):", project.annotations.len());
    for annotation in &project.annotations {
        let _ = writeln!(out, "  {:?}", annotation.text);
    }

    let total_area: f64 = project.polygons.iter().filter_map(|p| p.area).sum();
    if total_area > 0.0 {
        let unit = format!("sq {}", project.unit);
        let _ = writeln!(out, "Total area: {}", format_quantity(total_area, &unit));
    }
    out
}

/// One line per scale bar query.
pub fn scale_bar_report(scale: f64, unit: &str, zoom: f64) -> Option<String> {
    let bar = ScaleBar::compute(scale, zoom, unit)?;
    Some(format!("{} ({} px)", bar.label(), bar.width))
}

fn template_line(template: &FurnitureTemplate) -> String {
    format!(
        "  {} {} [{}]: {:.2} x {:.2} m",
        template.icon, template.name, template.id, template.width, template.depth
    )
}

/// The built-in catalog by category, or search results for `query`.
pub fn templates_report(library: &FurnitureLibrary, query: Option<&str>) -> String {
    let mut out = String::new();
    match query {
        Some(query) => {
            let found = library.search(query);
            let _ = writeln!(out, "{} match(es) for {:?}:", found.len(), query);
            for template in found {
                let _ = writeln!(out, "{}", template_line(template));
            }
        }
        None => {
            for category in library.categories() {
                let _ = writeln!(out, "{} {}", category.icon, category.name);
                for template in library.templates_by_category(category.id) {
                    let _ = writeln!(out, "{}", template_line(template));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_args(args(&[])), Ok(Command::Help));
        assert_eq!(
            parse_args(args(&["inspect", "plan.json"])),
            Ok(Command::Inspect { path: PathBuf::from("plan.json") })
        );
        assert_eq!(
            parse_args(args(&["migrate", "old.json", "new.json"])),
            Ok(Command::Migrate {
                input: PathBuf::from("old.json"),
                output: PathBuf::from("new.json"),
            })
        );
        assert_eq!(
            parse_args(args(&["scalebar", "50", "m"])),
            Ok(Command::ScaleBar { scale: 50.0, unit: "m".to_string(), zoom: 1.0 })
        );
        assert_eq!(
            parse_args(args(&["scalebar", "50", "m", "2.5"])),
            Ok(Command::ScaleBar { scale: 50.0, unit: "m".to_string(), zoom: 2.5 })
        );
        assert_eq!(
            parse_args(args(&["templates", "bed"])),
            Ok(Command::Templates { query: Some("bed".to_string()) })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(args(&["inspect"])).is_err());
        assert!(parse_args(args(&["scalebar", "0", "m"])).is_err());
        assert!(parse_args(args(&["scalebar", "abc", "m"])).is_err());
        assert!(parse_args(args(&["frobnicate"])).is_err());
    }

    #[test]
    fn test_project_report() {
        let project = ProjectData::from_json(
            r##"{
                "lines":[{"id":"l1","start":{"x":0,"y":0},"end":{"x":100,"y":0},"name":"Hall","color":"#ef4444","length":2,"unit":"m"}],
                "polygons":[{"id":"p1","points":[{"x":0,"y":0},{"x":1,"y":0},{"x":1,"y":1}],"name":"Kitchen","color":"#10b981","area":12.5,"unit":"sq m"}],
                "furniture":[{"id":"f1","type":"bed","name":"Bed","width":1.5,"depth":2,"x":0,"y":0,"rotation":90,"color":"#3b82f6"}],
                "annotations":[{"id":"a1","text":"North","x":0,"y":0,"fontSize":14,"color":"#000","backgroundColor":null}],
                "scale":50,
                "unit":"m"
            }"##,
        )
        .unwrap();

        let report = project_report(&project);
        assert!(report.contains("Scale: 50.0000 px/m"));
        assert!(report.contains("Hall: 2.00 m"));
        assert!(report.contains("Kitchen: 12.50 sq m"));
        assert!(report.contains("Bed [bed-queen]: 1.50 x 2.00 m, 90°"));
        assert!(report.contains("\"North\""));
        assert!(report.contains("Total area: 12.50 sq m"));
    }

    #[test]
    fn test_uncalibrated_report() {
        let report = project_report(&ProjectData::default());
        assert!(report.starts_with("Scale: not calibrated (unit m)"));
        assert!(!report.contains("Total area"));
    }

    #[test]
    fn test_scale_bar_report() {
        assert_eq!(scale_bar_report(50.0, "m", 1.0).as_deref(), Some("2 m (100 px)"));
    }

    #[test]
    fn test_templates_report() {
        let library = FurnitureLibrary::new();
        let all = templates_report(&library, None);
        assert!(all.contains("Kitchen/Dining"));
        assert!(all.contains("Refrigerator [fridge]: 0.70 x 0.70 m"));

        let found = templates_report(&library, Some("desk"));
        assert!(found.starts_with("2 match(es)"));
    }
}
