use crate::db::Record;

const NAME_WIDTH: usize = 30;
const URL_WIDTH: usize = 40;
const NAME_MAX: usize = 27;
const URL_MAX: usize = 37;
const ELLIPSIS: &str = "...";

/// Cut `s` to `max` characters, ellipsis included, when it is longer than that.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(ELLIPSIS.len())).collect();
        format!("{}{}", kept, ELLIPSIS)
    }
}

fn row(name: &str, url: &str) -> String {
    format!("| {:<NAME_WIDTH$} | {:<URL_WIDTH$} |", name, url)
}

pub fn render(records: &[Record]) -> String {
    let rule = "-".repeat(NAME_WIDTH + URL_WIDTH + 7);

    let mut lines = vec![
        "Bookmarks:".to_string(),
        rule.clone(),
        row("Name", "URL"),
        rule.clone(),
    ];
    lines.extend(
        records
            .iter()
            .map(|r| row(&truncate(&r.name, NAME_MAX), &truncate(&r.url, URL_MAX))),
    );
    lines.push(rule);
    lines.push(format!("Total bookmarks: {}", records.len()));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn print(records: &[Record]) {
    print!("{}", render(records));
}
