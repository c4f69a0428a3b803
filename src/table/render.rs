//! HTML and plain-text rendering of the matchup table.

use std::fmt::Write;

use crate::models::{PlayerMatchupRow, Stat};

use super::shade::Shade;
use super::sort::{sort_rows, SortColumn, SortDirection, SortState};

const PAGE_TITLE: &str = "NBA Daily Player Matchups";

const INTRO: &str = "This table presents the performance statistics of NBA players against their \
upcoming opponents based on their previous matchups. Each statistic represents the average \
performance of a player in various categories, such as points, rebounds, assists and more, when \
facing that particular team. For example, the \"PTS\" column reflects the number of points that a \
player has averaged against the opposing team historically compared to their season average.";

const RANK_NOTE: &str = "Note: For defensive rankings (1-30), 1 means that the opposing defence is \
the best in the league in that category, and 30 means they are worst.";

const STYLE: &str = "table{table-layout:fixed;width:100%;border-collapse:collapse}\
th{background:#f0ffff}th,td{padding:6px;text-align:center;border-bottom:1px solid #ddd}\
th a{color:inherit;text-decoration:none}.injured{color:red;cursor:pointer}";

/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Query string that selects `state` on the matchup page.
pub fn sort_query(state: &SortState) -> String {
    format!("sort={}&dir={}", state.column.code(), state.direction.code())
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/nba\">NBA</a> | <a href=\"/about\">About</a></nav>\n\
         <main>\n{body}</main>\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn sortable_header(out: &mut String, column: SortColumn, label: &str, tooltip: &str, state: &SortState) {
    let arrow = match state.direction_for(column) {
        Some(SortDirection::Ascending) => " &#9650;",
        Some(SortDirection::Descending) => " &#9660;",
        None => "",
    };
    let href = format!("/nba?{}", sort_query(&state.select(column)));
    let _ = write!(
        out,
        "<th title=\"{}\"><a href=\"{}\">{}{}</a></th>",
        escape_html(tooltip),
        escape_html(&href),
        escape_html(label),
        arrow
    );
}

fn plain_header(out: &mut String, label: &str) {
    let _ = write!(out, "<th>{}</th>", escape_html(label));
}

fn row_html(out: &mut String, row: &PlayerMatchupRow) {
    out.push_str("<tr>");
    let _ = write!(
        out,
        "<td>{}</td><td>{}</td><td>{}</td>",
        escape_html(&row.player),
        escape_html(&row.opposing_team),
        row.games_played
    );
    match &row.injury_note {
        Some(note) => {
            let _ = write!(out, "<td class=\"injured\" title=\"{}\">Inj</td>", escape_html(note));
        }
        None => out.push_str("<td title=\"No injury note\">-</td>"),
    }
    for (_, line) in row.stat_lines() {
        let _ = write!(
            out,
            "<td style=\"background-color: {}\">{}</td><td>{}</td>",
            Shade::for_value(line.value).css(),
            line.value,
            line.rank
        );
    }
    out.push_str("</tr>\n");
}

/// Full matchup page for `rows` ordered by `state`.
pub fn render_matchup_page(rows: &[PlayerMatchupRow], state: &SortState) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", PAGE_TITLE);
    let _ = writeln!(body, "<p>{}</p>", escape_html(INTRO));
    let _ = writeln!(body, "<p>{}</p>", escape_html(RANK_NOTE));

    body.push_str("<table>\n<thead><tr>");
    plain_header(&mut body, "Player");
    plain_header(&mut body, "Opposing Team");
    sortable_header(
        &mut body,
        SortColumn::GamesPlayed,
        "Games Played",
        "Total games played vs opposing team",
        state,
    );
    plain_header(&mut body, "Injury Note");
    for stat in Stat::ALL {
        sortable_header(&mut body, SortColumn::Stat(stat), stat.code(), stat.description(), state);
        plain_header(&mut body, &format!("Defence Rank ({})", stat.code()));
    }
    body.push_str("</tr></thead>\n<tbody>\n");

    for row in sort_rows(rows, state) {
        row_html(&mut body, row);
    }
    body.push_str("</tbody>\n</table>\n");

    page(PAGE_TITLE, &body)
}

/// Static about page.
pub fn render_about_page() -> String {
    let body = "<h1>About Me</h1>\n\
        <p>I'm just a normal guy who has watched and played a ton of sports and have had success \
        betting over the past year. I aim to provide enough explanation and reasoning so that it can \
        aid your own judgement on what picks you decide to tail.</p>\n\
        <p>For reference, I am up around 152u and 94u on Bet365 and DraftKings solely this month. \
        I use Fanduel, BetMGM and occasionally PointsBet as well, however they don't provide \
        monthly reports.</p>\n";
    page("About", body)
}

/// Fixed-width text table for terminals.
pub fn render_text_table(rows: &[PlayerMatchupRow], state: &SortState) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<24} {:<6} {:>3} {:<4}", "PLAYER", "OPP", "GP", "INJ");
    for stat in Stat::ALL {
        let _ = write!(out, " {:>6} {:>3}", stat.code(), "RK");
    }
    out.push('\n');

    for row in sort_rows(rows, state) {
        let injury = if row.is_injured() { "Inj" } else { "-" };
        let _ = write!(
            out,
            "{:<24} {:<6} {:>3} {:<4}",
            row.player, row.opposing_team, row.games_played, injury
        );
        for (_, line) in row.stat_lines() {
            let _ = write!(out, " {:>6.1} {:>3}", line.value, line.rank);
        }
        out.push('\n');
    }
    out
}
