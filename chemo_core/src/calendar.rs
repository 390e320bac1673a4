//! Plain-text calendar grid for an ordered schedule.
//!
//! Each day is a three-line cell (`Day N`, tablet count, mg) laid out in
//! fixed-width columns, one week per row by default.

use crate::OrderedSchedule;

/// Minimum cell width in characters
const MIN_CELL_WIDTH: usize = 12;
const CELL_LINES: usize = 3;

/// Render the calendar with `columns` days per row
pub fn render_calendar(schedule: &OrderedSchedule, tablet_strength_mg: f64, columns: usize) -> String {
    let columns = columns.max(1);
    let cells: Vec<[String; CELL_LINES]> = schedule
        .as_slice()
        .iter()
        .enumerate()
        .map(|(index, &tablets)| {
            [
                format!("Day {}", index + 1),
                format!("{} tab(s)", tablets),
                format!("({} mg)", format_mg(f64::from(tablets) * tablet_strength_mg)),
            ]
        })
        .collect();

    let width = cells
        .iter()
        .flat_map(|cell| cell.iter().map(|line| line.chars().count()))
        .max()
        .unwrap_or(0)
        .max(MIN_CELL_WIDTH);

    let header = (1..=columns)
        .map(|column| format!("{:^width$}", format!("D{}", column), width = width))
        .collect::<Vec<_>>()
        .join(" | ");
    let rule = "-".repeat(header.chars().count());

    let mut lines = vec![header, rule.clone()];
    for row in cells.chunks(columns) {
        for line in 0..CELL_LINES {
            let text = (0..columns)
                .map(|column| {
                    let content = row.get(column).map(|cell| cell[line].as_str()).unwrap_or("");
                    format!("{:<width$}", content, width = width)
                })
                .collect::<Vec<_>>()
                .join(" | ");
            lines.push(text);
        }
        lines.push(rule.clone());
    }

    lines.join("\n")
}

/// Format a milligram amount without a trailing ".0"
pub fn format_mg(mg: f64) -> String {
    if (mg - mg.round()).abs() < 1e-9 {
        format!("{}", mg.round() as i64)
    } else {
        let text = format!("{:.2}", mg);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_layout() {
        let schedule = OrderedSchedule::from_days(vec![2, 2, 1]);
        let calendar = render_calendar(&schedule, 50.0, 7);
        let lines: Vec<&str> = calendar.lines().collect();

        // header, rule, 3 cell lines, rule
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("     D1     | "));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("Day 1        | Day 2        | Day 3"));
        assert!(lines[3].starts_with("2 tab(s)     | 2 tab(s)     | 1 tab(s)"));
        assert!(lines[4].starts_with("(100 mg)     | (100 mg)     | (50 mg)"));
        assert_eq!(lines[0].len(), lines[2].len());
    }

    #[test]
    fn test_calendar_rows() {
        let schedule = OrderedSchedule::from_days(vec![1; 15]);
        let calendar = render_calendar(&schedule, 25.0, 7);

        // header + rule + 3 rows of (3 lines + rule)
        assert_eq!(calendar.lines().count(), 2 + 3 * 4);
        assert!(calendar.contains("Day 15"));
        assert!(!calendar.contains("Day 16"));
    }

    #[test]
    fn test_wide_cells_grow() {
        let schedule = OrderedSchedule::from_days(vec![12]);
        let calendar = render_calendar(&schedule, 1234.56, 7);
        assert!(calendar.contains("(14814.72 mg)"));
        let header = calendar.lines().next().unwrap();
        assert_eq!(header.len(), 7 * 13 + 6 * 3);
    }

    #[test]
    fn test_format_mg() {
        assert_eq!(format_mg(100.0), "100");
        assert_eq!(format_mg(12.5), "12.5");
        assert_eq!(format_mg(0.25), "0.25");
    }
}
