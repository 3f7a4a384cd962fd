use chrono::{DateTime, Utc};
use colored::Colorize;
use licenprep::api::{CmdMessage, Dashboard, MessageLevel};
use licenprep::config::AppConfig;
use licenprep::faculty::{Bucket, FacultyBoard};
use licenprep::model::{Mcq, Settings, Textbook, TextbookStatus};
use licenprep::practice::PracticeSession;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const BAR_WIDTH: usize = 30;
const SYSTEM_WIDTH: usize = 18;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_dashboard(dashboard: &Dashboard) {
    println!("{} day streak", dashboard.streak.to_string().bold());
    println!();

    let accuracy = dashboard
        .accuracy
        .map(|a| format!("{:.0}%", a))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "Questions answered  {}",
        dashboard.questions_answered.to_string().bold()
    );
    println!("Accuracy            {}", accuracy.bold());
    println!(
        "Study time          {}",
        format_minutes(dashboard.time_spent_minutes).bold()
    );
    println!(
        "Textbooks           {}/{} processed",
        dashboard.textbooks_processed, dashboard.textbooks_total
    );
    println!("Active questions    {}", dashboard.active_questions);
    println!("Pending review      {}", dashboard.pending_review);
    println!();

    for progress in &dashboard.system_progress {
        let name = pad_to_width(&progress.system, SYSTEM_WIDTH);
        println!(
            "  {}{} {:>3}%",
            name,
            progress_bar(progress.progress),
            progress.progress
        );
    }
}

pub(super) fn print_textbooks(textbooks: &[Textbook]) {
    if textbooks.is_empty() {
        println!("No textbooks uploaded.");
        return;
    }

    for textbook in textbooks {
        let status = match textbook.status {
            TextbookStatus::Processed => textbook.status.to_string().green(),
            TextbookStatus::Processing => textbook.status.to_string().yellow(),
            TextbookStatus::Failed => textbook.status.to_string().red(),
        };
        let status_width = textbook.status.to_string().width();
        let id = format!("{}  ", textbook.id);
        let pages = if textbook.pages > 0 {
            format!(" ({} pages)", textbook.pages)
        } else {
            String::new()
        };
        let label = format!("{}{}", textbook.title, pages);

        let fixed = id.width() + status_width + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let label = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label.width());

        println!(
            "{}{}{}  {}{}",
            id.dimmed(),
            label,
            " ".repeat(padding),
            status,
            format_time_ago(textbook.uploaded_at).dimmed()
        );
    }
}

/// One line per question: id, difficulty, category and a stem preview.
pub(super) fn print_question_list(questions: &[Mcq]) {
    if questions.is_empty() {
        println!("    {}", "(empty)".dimmed());
        return;
    }
    for mcq in questions {
        let prefix = format!("    {}  ", mcq.id);
        let tag = format!("[{} · {}] ", mcq.category, mcq.difficulty);
        let available = LINE_WIDTH.saturating_sub(prefix.width() + tag.width());
        let stem = truncate_to_width(&mcq.stem.replace('\n', " "), available);
        println!("{}{}{}", prefix.yellow(), tag.dimmed(), stem);
    }
}

pub(super) fn print_board(board: &FacultyBoard, only: Option<Bucket>) {
    for bucket in Bucket::ALL {
        if only.is_some_and(|b| b != bucket) {
            continue;
        }
        let heading = format!("{} ({})", bucket, board.bucket(bucket).len());
        let heading = match bucket {
            Bucket::Pending => heading.yellow().bold(),
            Bucket::Approved => heading.green().bold(),
            Bucket::Flagged => heading.red().bold(),
        };
        println!("{}", heading);
        print_question_list(board.bucket(bucket));
        println!();
    }
}

pub(super) fn print_settings(settings: &Settings, config: &AppConfig) {
    println!("model  = {}", settings.model_tier);
    println!("budget = {}", settings.token_budget);
    println!("theme  = {}", settings.theme);
    println!("api    = {}", config.api_base_url);
    match config.request_timeout_secs {
        Some(secs) => println!("timeout = {}s", secs),
        None => println!("timeout = none"),
    }
    println!(
        "{}",
        format!(
            "Estimated monthly cost: ${:.2}",
            settings.estimated_monthly_cost()
        )
        .dimmed()
    );
}

/// Render the current question, its options and, once answered, the
/// verdict and (if toggled on) the explanation.
pub(super) fn print_question(mcq: &Mcq, position: usize, total: usize, session: &PracticeSession) {
    println!();
    println!(
        "{} {}",
        format!("Question {}/{}", position + 1, total).bold(),
        format!("[{} · {}]", mcq.category, mcq.difficulty).dimmed()
    );
    println!("{}", mcq.stem);
    println!();

    for answer in &mcq.answers {
        let line = format!("  {}) {}", answer.id, answer.text);
        if !session.is_answered() {
            println!("{}", line);
        } else if answer.id == mcq.correct_answer {
            println!("{}", line.green());
        } else if session.selected_answer() == Some(answer.id.as_str()) {
            println!("{}", line.red());
        } else {
            println!("{}", line.dimmed());
        }
    }

    if session.is_answered() && session.show_explanation() {
        println!();
        println!("{} {}", "Explanation:".bold(), mcq.explanation);
    }
}

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress) * BAR_WIDTH / 100;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH.saturating_sub(filled))
    );
    match progress {
        0..=33 => bar.red().to_string(),
        34..=66 => bar.yellow().to_string(),
        _ => bar.green().to_string(),
    }
}

fn format_minutes(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

fn pad_to_width(s: &str, width: usize) -> String {
    let s = truncate_to_width(s, width);
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
