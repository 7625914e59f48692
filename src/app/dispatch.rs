use super::{App, Page};
use crate::assets::EnsureOutcome;
use crate::catalog::Department;
use crate::chat::{ChatMessage, ChatSession, MessageRole, SendOutcome};
use crate::cli::{Cli, Commands};
use crate::navigation::{NavParams, View, ViewState};
use crate::pages::{DepartmentDetail, DepartmentNotFound, FacultyProfile};
use crate::ui::style as ui;
use anyhow::{Result, bail};
use dialoguer::Input;

/// One step of a `campus navigate` replay.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NavStep {
    /// Browser location change (`#/academics`).
    Fragment(String),
    /// In-app navigation request (`department-detail:2`).
    Request { token: String, params: NavParams },
}

impl NavStep {
    fn parse(raw: &str) -> Self {
        if raw.starts_with('#') {
            return Self::Fragment(raw.to_string());
        }
        match raw.split_once(':') {
            Some((token, id)) => Self::Request {
                token: token.to_string(),
                params: NavParams::with_id(id),
            },
            None => Self::Request {
                token: raw.to_string(),
                params: NavParams::none(),
            },
        }
    }
}

fn print_message(message: &ChatMessage) {
    match message.role {
        MessageRole::User => println!("  {} {}", ui::muted("you >"), message.content),
        MessageRole::Assistant => println!("  {} {}", ui::marker("iub >"), message.content),
    }
}

fn print_reply(outcome: &SendOutcome) {
    match outcome {
        SendOutcome::Replied(reply) => print_message(reply),
        SendOutcome::Ignored(reason) => {
            tracing::debug!(?reason, "message not sent");
        }
    }
}

async fn run_chat(session: &ChatSession, message: Option<String>) -> Result<()> {
    if let Some(message) = message {
        print_reply(&session.send(&message).await);
        return Ok(());
    }

    for greeting in session.messages() {
        print_message(&greeting);
    }
    println!("  {}", ui::muted("Type 'exit' to leave."));
    loop {
        let line: String = Input::new()
            .with_prompt("  you")
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        print_reply(&session.send(line).await);
    }
    Ok(())
}

fn print_department_row(dept: &Department) {
    println!(
        "  {} {}  {}",
        ui::marker(format!("[{}]", dept.id)),
        ui::brand(&dept.name),
        ui::muted(&dept.faculty)
    );
}

fn print_not_found(missing: &DepartmentNotFound) {
    println!("  {}", ui::notice(DepartmentNotFound::TITLE));
    println!("  {}", missing.detail());
    println!(
        "  {} {}",
        ui::muted(format!("{}:", DepartmentNotFound::ACTION)),
        ui::muted("campus departments")
    );
}

fn print_department(dept: &Department, header_image: &str) {
    println!("  {}", ui::title(&dept.name));
    println!("  {}", ui::muted(&dept.faculty));
    println!("  {}", ui::link(header_image));
    if let Some(description) = &dept.description {
        println!();
        println!("  {description}");
    }
    if let Some(head) = &dept.head_of_department {
        println!("  {} {head}", ui::muted("Head of Department:"));
    }
    if !dept.research_areas.is_empty() {
        println!("  {} {}", ui::muted("Research areas:"), dept.research_areas.join(", "));
    }
    if !dept.programs_offered.is_empty() {
        println!();
        println!("  {}", ui::title("Programs"));
        for program in &dept.programs_offered {
            println!(
                "  {} {} {}",
                ui::marker("*"),
                program.name,
                ui::muted(format!("({})", program.duration))
            );
        }
    }
    if !dept.faculty_members.is_empty() {
        println!();
        println!("  {}", ui::title("Faculty"));
        for member in &dept.faculty_members {
            println!(
                "  {} {} {}",
                ui::marker("*"),
                member.name,
                ui::muted(format!("- {}", member.designation))
            );
        }
    }
    if let Some(email) = &dept.contact_email {
        println!();
        println!("  {} {email}", ui::muted("Email:"));
    }
    if let Some(phone) = &dept.contact_phone {
        println!("  {} {phone}", ui::muted("Phone:"));
    }
}

fn print_profile(profile: &FacultyProfile) {
    let member = profile.member();
    println!("  {}", ui::title(&member.name));
    println!("  {}", ui::muted(format!("{} | {}", member.designation, member.qualification)));
    println!("  {}", ui::link(profile.avatar_url()));
    println!();
    println!("  {}", profile.display_bio());
    if !member.research_interests.is_empty() {
        println!();
        println!("  {} {}", ui::muted("Research interests:"), member.research_interests.join(", "));
    }
    if !member.publications.is_empty() {
        println!();
        println!("  {}", ui::title("Publications"));
        for publication in &member.publications {
            match publication.link() {
                Some(link) => println!(
                    "  {} {} {}",
                    ui::marker("*"),
                    publication.display_text(),
                    ui::link(link)
                ),
                None => println!("  {} {}", ui::marker("*"), publication.display_text()),
            }
        }
    }
}

fn print_state(step: &str, state: &ViewState) {
    println!(
        "  {:<28} {} {}  {}",
        step,
        ui::muted("->"),
        ui::brand(state.current),
        ui::muted(format!(
            "selected={}",
            state.selected_entity_id.as_deref().unwrap_or("-")
        ))
    );
}

async fn open_department(app: &App, id: &str) -> Page {
    let nav = app.navigation();
    nav.navigate(View::DepartmentDetail, NavParams::with_id(id));
    nav.settled().await;
    app.render()
}

pub async fn dispatch(cli: Cli, app: App) -> Result<()> {
    match cli.command {
        Commands::Chat { message } => run_chat(app.assistant(), message).await,

        Commands::Departments { query } => {
            let mut page = app.academics_page();
            if let Some(query) = query {
                page.set_query(query);
            }
            let results = page.results();
            if results.is_empty() {
                println!("  {}", ui::notice("No departments match that search."));
            }
            for dept in results {
                print_department_row(dept);
            }
            Ok(())
        }

        Commands::Department { id } => {
            match open_department(&app, &id).await {
                Page::DepartmentDetail(DepartmentDetail::Found(page)) => {
                    print_department(page.department(), &page.header_image());
                }
                Page::DepartmentDetail(DepartmentDetail::NotFound(missing)) => {
                    print_not_found(&missing);
                }
                other => bail!("unexpected page after navigation: {other:?}"),
            }
            Ok(())
        }

        Commands::Faculty {
            department_id,
            name,
            ask,
        } => {
            let mut page = match open_department(&app, &department_id).await {
                Page::DepartmentDetail(DepartmentDetail::Found(page)) => page,
                Page::DepartmentDetail(DepartmentDetail::NotFound(missing)) => {
                    print_not_found(&missing);
                    return Ok(());
                }
                other => bail!("unexpected page after navigation: {other:?}"),
            };
            let Some(profile) = page.select_faculty(&name) else {
                bail!("No faculty member named {name:?} in department {department_id}");
            };

            if profile.is_bio_generating() {
                println!("  {}", ui::muted("Generating biography..."));
            }
            profile.wait_for_bio().await;
            print_profile(profile);

            if let Some(question) = ask {
                println!();
                let chat = profile.chat();
                if let Some(greeting) = chat.messages().first() {
                    print_message(greeting);
                }
                print_message(&ChatMessage::user(question.trim()));
                print_reply(&chat.send(&question).await);
            }
            Ok(())
        }

        Commands::Image { department_id } => {
            let home = app.home_page();
            match home.generate_image(&department_id).await {
                EnsureOutcome::Generated(asset) | EnsureOutcome::Cached(asset) => {
                    println!(
                        "  {} {}",
                        ui::done("✓"),
                        ui::muted(format!("{} bytes", asset.len()))
                    );
                    println!("{asset}");
                }
                EnsureOutcome::InFlight => {
                    println!("  {}", ui::muted("Generation already in progress."));
                }
                EnsureOutcome::Failed => {
                    println!(
                        "  {}",
                        ui::notice("Image generation failed; showing the fixture image.")
                    );
                    if let Some(image) = home.department_image(&department_id) {
                        println!("{image}");
                    }
                }
            }
            Ok(())
        }

        Commands::Navigate { steps } => {
            let nav = app.navigation();
            for raw in steps {
                match NavStep::parse(&raw) {
                    NavStep::Fragment(fragment) => {
                        if nav.on_location_changed(&fragment).is_none() {
                            println!("  {:<28} {}", raw, ui::muted("ignored"));
                            continue;
                        }
                    }
                    NavStep::Request { token, params } => {
                        nav.navigate_token(&token, params);
                        nav.settled().await;
                    }
                }
                print_state(&raw, &nav.snapshot());
            }
            Ok(())
        }

        Commands::News => {
            for item in app.catalog().news() {
                println!(
                    "  {} {}  {}",
                    ui::marker(format!("[{}]", item.category)),
                    ui::title(&item.title),
                    ui::muted(&item.date)
                );
                println!("  {}", item.excerpt);
            }
            Ok(())
        }

        Commands::Stats => {
            for stat in app.catalog().stats() {
                println!("  {:>8}  {}", ui::brand(&stat.value), stat.label);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_are_location_changes() {
        assert_eq!(
            NavStep::parse("#/department-detail"),
            NavStep::Fragment("#/department-detail".into())
        );
    }

    #[test]
    fn targets_may_carry_an_id() {
        assert_eq!(
            NavStep::parse("department-detail:2"),
            NavStep::Request {
                token: "department-detail".into(),
                params: NavParams::with_id("2"),
            }
        );
        assert_eq!(
            NavStep::parse("academics"),
            NavStep::Request {
                token: "academics".into(),
                params: NavParams::none(),
            }
        );
    }
}
