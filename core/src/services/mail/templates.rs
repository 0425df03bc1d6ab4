//! Plain HTML bodies for verification and stats emails.

use std::fmt::Write as _;

use crate::domain::entities::ReservationStats;

/// Rendered subject and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

/// Escape text for interpolation into HTML
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_verification_email(first_name: &str, code: &str, validity_hours: i64) -> EmailContent {
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<body>\n\
         <h1>Phone Number Reservation</h1>\n\
         <p>Hello {name},</p>\n\
         <p>Thank you for reserving a phone number. Use the code below to verify your reservation:</p>\n\
         <p style=\"font-size:28px;font-weight:bold;letter-spacing:4px\">{code}</p>\n\
         <p>This code expires in {hours} hours.</p>\n\
         <p>If you did not make this request, you can ignore this email.</p>\n\
         </body>\n</html>\n",
        name = escape_html(first_name),
        code = escape_html(code),
        hours = validity_hours,
    );

    EmailContent {
        subject: "Verify Your Phone Number Reservation".to_string(),
        html,
    }
}

pub fn render_stats_email(stats: &ReservationStats) -> EmailContent {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<body>\n<h1>Reservation Statistics</h1>\n");

    // Writing to a String cannot fail
    let _ = write!(
        html,
        "<table border=\"1\" cellpadding=\"6\" cellspacing=\"0\">\n\
         <tr><td>Total Reservations</td><td>{}</td></tr>\n\
         <tr><td>Verified</td><td>{}</td></tr>\n\
         <tr><td>Unverified</td><td>{}</td></tr>\n\
         <tr><td>Last 2 Hours</td><td>{}</td></tr>\n\
         </table>\n",
        stats.total_reservations,
        stats.verified_reservations,
        stats.unverified_reservations,
        stats.reservations_last_2_hours,
    );

    html.push_str("<h2>Top Countries</h2>\n");
    if stats.top_countries.is_empty() {
        html.push_str("<p>No reservations yet.</p>\n");
    } else {
        html.push_str("<table border=\"1\" cellpadding=\"6\" cellspacing=\"0\">\n<tr><th>Country</th><th>Reservations</th></tr>\n");
        for entry in &stats.top_countries {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(&entry.country),
                entry.count
            );
        }
        html.push_str("</table>\n");
    }

    let _ = write!(
        html,
        "<p>Generated at {}</p>\n</body>\n</html>\n",
        stats.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    EmailContent {
        subject: "Phone Number Reservation Stats".to_string(),
        html,
    }
}
