use crate::analyze::scoring::{CHECKIN_POINTS, HAS_OKR_POINTS};
use crate::report::points::PointsTable;
use crate::types::report::RunReport;

/// Points granted on the sheet for checking in with peers and managers.
/// Not derived from any signal; every user receives it.
const PEER_CHECKIN_POINTS: f64 = 0.5;

pub fn to_markdown(report: &RunReport, points: &PointsTable) -> String {
    let mut output = String::new();
    output.push_str("# OKR Scoring Report\n\n");
    output.push_str(&format!(
        "Check-ins analyzed from {} to {}; movement as of {}.\n\n",
        report.window.start.format("%d/%m/%Y"),
        report.window.end.format("%d/%m/%Y"),
        report.as_of.format("%m/%Y"),
    ));

    let summary = &report.summary;
    output.push_str("## Summary\n\n");
    output.push_str(&format!(
        "- total users: {}\n- users with check-ins: {} ({:.0}%)\n- users with OKR: {} ({:.0}%)\n- average score: {:.2}\n\n",
        summary.total_users,
        summary.users_with_checkins,
        summary.share(summary.users_with_checkins) * 100.0,
        summary.users_with_okr,
        summary.share(summary.users_with_okr) * 100.0,
        summary.average_score,
    ));

    output.push_str("## User Scores\n\n");
    if report.users.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| Name | Has OKR | Check-in | OKR Movement | Score |\n");
        output.push_str("|---|---|---|---|---|\n");
        for user in &report.users {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {:.2} |\n",
                user.name,
                yes_no(user.has_okr),
                yes_no(user.checked_in),
                user.movement,
                user.score
            ));
        }
        output.push('\n');
        output.push_str(&points_sheet(report, points));
    }

    output.push_str("## Warnings\n\n");
    if report.warnings.is_empty() {
        output.push_str("- none\n");
    } else {
        for warning in &report.warnings {
            output.push_str(&format!("- [{}] {}\n", warning.source, warning.message));
        }
    }

    output
}

/// Criteria down the side, one column per user.
fn points_sheet(report: &RunReport, points: &PointsTable) -> String {
    let users = &report.users;
    let mut sheet = String::from("## Points Sheet\n\n");

    sheet.push_str("| # | Criterion | Points |");
    for user in users {
        sheet.push_str(&format!(" {} |", user.name));
    }
    sheet.push('\n');
    sheet.push_str("|---|---|---|");
    sheet.push_str(&"---|".repeat(users.len()));
    sheet.push('\n');

    let mut row = |number: &str, criterion: &str, max: String, cells: Vec<String>| {
        sheet.push_str(&format!("| {number} | {criterion} | {max} |"));
        for cell in cells {
            sheet.push_str(&format!(" {cell} |"));
        }
        sheet.push('\n');
    };

    row(
        "1",
        "Personal OKRs up to date",
        format_points(HAS_OKR_POINTS),
        users
            .iter()
            .map(|user| format_points(if user.has_okr { HAS_OKR_POINTS } else { 0.0 }))
            .collect(),
    );
    row(
        "2",
        "Weekly check-in (at least once a week)",
        format_points(CHECKIN_POINTS),
        users
            .iter()
            .map(|user| format_points(if user.checked_in { CHECKIN_POINTS } else { 0.0 }))
            .collect(),
    );
    row(
        "3",
        "Check-ins with peers and managers",
        format_points(PEER_CHECKIN_POINTS),
        users
            .iter()
            .map(|_| format_points(PEER_CHECKIN_POINTS))
            .collect(),
    );
    row(
        "4",
        "OKR movement this month (vs previous month)",
        String::new(),
        users.iter().map(|user| format!("{}%", user.movement)).collect(),
    );

    let band_per_user: Vec<usize> = users
        .iter()
        .map(|user| points.band_index(user.movement))
        .collect();
    for (index, band) in points.bands().iter().enumerate() {
        row(
            "",
            band.label.as_str(),
            format_points(band.points),
            band_per_user
                .iter()
                .map(|user_band| {
                    if *user_band == index {
                        format_points(band.points)
                    } else {
                        String::new()
                    }
                })
                .collect(),
        );
    }

    row(
        "5",
        "Total",
        String::new(),
        users.iter().map(|user| format!("{:.2}", user.score)).collect(),
    );

    sheet.push('\n');
    sheet
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn format_points(points: f64) -> String {
    format!("{points}")
}
