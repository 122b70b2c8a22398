use std::io::Write;

use plate_ocr_types::Detection;

use crate::cli::OutputFormat;
use crate::error::RunResult;
use crate::pipeline::RunReport;

pub fn write_report<W: Write>(
    out: &mut W,
    report: &RunReport,
    format: OutputFormat,
    show_detections: bool,
) -> RunResult<()> {
    match format {
        OutputFormat::Text => write_text(out, report, show_detections),
        OutputFormat::Json => write_json(out, report),
    }
}

fn write_text<W: Write>(out: &mut W, report: &RunReport, show_detections: bool) -> RunResult<()> {
    if show_detections {
        for detection in &report.detections {
            writeln!(out, "{}", describe_detection(detection))?;
        }
    }
    writeln!(out, "{}", report.result.joined)?;
    Ok(())
}

fn write_json<W: Write>(out: &mut W, report: &RunReport) -> RunResult<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

fn describe_detection(detection: &Detection) -> String {
    let text = detection.text.as_deref().unwrap_or("<no text>");
    match detection.confidence {
        Some(confidence) => format!("{} {:?} {:.3}", detection.region, text, confidence),
        None => format!("{} {:?} <no confidence>", detection.region, text),
    }
}

#[cfg(test)]
mod tests {
    use super::write_report;
    use crate::cli::OutputFormat;
    use crate::pipeline::RunReport;
    use plate_ocr_types::{Detection, FilterResult, Region};
    use std::path::PathBuf;

    fn report() -> RunReport {
        RunReport {
            image: PathBuf::from("cars/car3.PNG"),
            engine: "replay",
            threshold: 0.3,
            detections: vec![
                Detection::new(Region::new(0.0, 0.0, 10.0, 4.0), "AB12XYZ").with_confidence(0.9),
                Detection::new(Region::new(0.0, 5.0, 2.0, 2.0), "--").with_confidence(0.1),
            ],
            result: FilterResult::from_accepted(vec!["AB12XYZ".into()]),
        }
    }

    fn render(format: OutputFormat, show_detections: bool) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, &report(), format, show_detections).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn text_lists_detections_then_joined_line() {
        let output = render(OutputFormat::Text, true);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "(0, 0, 10x4) \"AB12XYZ\" 0.900",
                "(0, 5, 2x2) \"--\" 0.100",
                "AB12XYZ",
            ]
        );
    }

    #[test]
    fn hidden_detections_leave_only_joined_line() {
        assert_eq!(render(OutputFormat::Text, false), "AB12XYZ\n");
    }

    #[test]
    fn json_report_carries_accepted_and_joined() {
        let output = render(OutputFormat::Json, true);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["engine"], "replay");
        assert_eq!(value["joined"], "AB12XYZ");
        assert_eq!(value["accepted"][0], "AB12XYZ");
        assert_eq!(value["detections"].as_array().map(Vec::len), Some(2));
    }
}
