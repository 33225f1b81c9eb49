use playbook_core::{DayColumn, DaySession, PlaybookSheet, Rgb, RowWarning, ScheduleRecord, SlotState};
use tabled::builder::Builder;
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use uuid::Uuid;

const NAME_WIDTH: usize = 20;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Teammate")]
    name: String,
    #[tabled(rename = "Shift")]
    shift: String,
    #[tabled(rename = "Break")]
    break_time: String,
    #[tabled(rename = "Focus")]
    focus: String,
}

fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Cut `text` to `width` terminal columns, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn show_days(days: &[DayColumn]) {
    for day in days {
        let breaks = if day.break_col.is_some() { " (break column)" } else { "" };
        println!("  {:<10} {}{}", day.label(), day.day_name(), breaks);
    }
}

pub fn show_records(session: &DaySession) {
    let title = match &session.period {
        Some(period) => format!("{} [{}]", session.header().title(), period),
        None => session.header().title(),
    };
    println!("\x1b[1;36m{}\x1b[0m ({})", title, session.source.display());

    if session.roster.is_empty() {
        println!("No one is scheduled.");
        return;
    }

    let rows: Vec<RecordRow> = session
        .roster
        .records()
        .iter()
        .enumerate()
        .map(|(i, r): (usize, &ScheduleRecord)| RecordRow {
            position: i + 1,
            id: short_id(&r.id),
            name: truncate(&r.employee_name, NAME_WIDTH),
            shift: r.shift_text(),
            break_time: r.break_text(),
            focus: if r.zone_names().is_empty() { "-".to_string() } else { r.zone_label() },
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

pub fn show_warnings(warnings: &[RowWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n\x1b[1;33m{} row(s) skipped:\x1b[0m", warnings.len());
    for warning in warnings {
        println!("  {}", warning);
    }
}

/// Grid cell: legend number for a zone, `?` for unassigned, `B` for break.
fn cell_glyph(state: &SlotState, zone: Option<&str>, sheet: &PlaybookSheet) -> String {
    match state {
        SlotState::Empty => String::new(),
        SlotState::OnBreak => "B".to_string(),
        SlotState::Working(_) => match zone.and_then(|name| sheet.legend.iter().position(|e| e.zone == name)) {
            Some(i) => (i + 1).to_string(),
            None => "?".to_string(),
        },
    }
}

fn swatch(color: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m   \x1b[0m", color.r, color.g, color.b)
}

pub fn show_grid(sheet: &PlaybookSheet) {
    let mut builder = Builder::default();

    let mut header = vec!["Teammate".to_string()];
    header.extend(sheet.slot_labels.iter().cloned());
    header.push("Focus".to_string());
    builder.push_record(header);

    for row in &sheet.rows {
        let mut record = vec![truncate(&row.name, NAME_WIDTH)];
        record.extend(
            row.cells
                .iter()
                .zip(&row.cell_zones)
                .map(|(state, zone)| cell_glyph(state, zone.as_deref(), sheet)),
        );
        record.push(row.focus.clone());
        builder.push_record(record);
    }

    let mut table = builder.build();
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN))
        .with(Modify::new(Columns::first()).with(Color::BOLD));

    println!("\n\x1b[1;36mDAILY PLAYBOOK - {}\x1b[0m", sheet.header.title());
    println!("{}", table);

    println!("Legend:");
    for (i, entry) in sheet.legend.iter().enumerate() {
        println!("  {} {} {}", i + 1, swatch(entry.color), entry.zone);
    }
    println!("  ? {} Unassigned", swatch(playbook_core::UNASSIGNED_COLOR));
    println!("  B     Break");
}

#[cfg(test)]
mod tests {
    use super::*;
    use playbook_core::service::PageLayout;
    use playbook_core::{LegendEntry, SheetHeader};

    fn sheet(legend: &[(&str, Rgb)]) -> PlaybookSheet {
        PlaybookSheet {
            header: SheetHeader::new("Monday", None),
            slot_labels: Vec::new(),
            rows: Vec::new(),
            legend: legend
                .iter()
                .map(|(zone, color)| LegendEntry { zone: zone.to_string(), color: *color })
                .collect(),
            layout: PageLayout::default(),
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Doe, Jane", 20), "Doe, Jane");
        assert_eq!(truncate("Abcdefghij", 5), "Abcd…");
        // Wide glyphs count double.
        assert_eq!(truncate("山田太郎花子", 5), "山田…");
    }

    #[test]
    fn test_glyphs_follow_zone_names_not_colors() {
        let teal = Rgb::from_hex("#00B0A0").unwrap();
        let gray = playbook_core::UNASSIGNED_COLOR;
        let sheet = sheet(&[("Adults", teal), ("Kids", teal), ("Fitting", gray)]);

        assert_eq!(cell_glyph(&SlotState::Working(teal), Some("Adults"), &sheet), "1");
        assert_eq!(cell_glyph(&SlotState::Working(teal), Some("Kids"), &sheet), "2");
        assert_eq!(cell_glyph(&SlotState::Working(gray), Some("Fitting"), &sheet), "3");
        assert_eq!(cell_glyph(&SlotState::Working(gray), None, &sheet), "?");
        assert_eq!(cell_glyph(&SlotState::OnBreak, None, &sheet), "B");
        assert_eq!(cell_glyph(&SlotState::Empty, None, &sheet), "");
    }
}
