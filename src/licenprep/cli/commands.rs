use super::args::{Cli, Commands, GenerateArgs, ReviewAction, SettingsAction, TextbookAction};
use super::practice::run_practice;
use super::print::{
    print_board, print_dashboard, print_messages, print_question_list, print_settings,
    print_textbooks,
};
use licenprep::api::{validate_settings, CmdMessage, LicenPrepApi};
use licenprep::config::{self, AppConfig};
use licenprep::error::{LicenPrepError, Result};
use licenprep::faculty::Bucket;
use licenprep::generation::{GenerateRequest, HttpGenerator};
use licenprep::model::{SettingsUpdate, TextbookStatus, Theme};
use licenprep::state::AppState;
use licenprep::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tracing::info;

type CliApi = LicenPrepApi<FsBackend, HttpGenerator>;

struct AppContext {
    api: CliApi,
    data_dir: PathBuf,
    config: AppConfig,
}

pub(super) fn dispatch(cli: Cli) -> Result<()> {
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Dashboard) | None => handle_dashboard(&ctx),
        Some(Commands::Textbooks { action }) => handle_textbooks(&mut ctx, action),
        Some(Commands::Practice) => handle_practice(&mut ctx),
        Some(Commands::Generate(args)) => handle_generate(&mut ctx, args),
        Some(Commands::Review { action }) => handle_review(&mut ctx, action),
        Some(Commands::Settings { action }) => handle_settings(&mut ctx, action),
    }
}

fn init_context() -> Result<AppContext> {
    let data_dir: PathBuf = config::data_dir()?;
    let config = AppConfig::load(&data_dir)?.with_env_overrides();
    info!(data_dir = %data_dir.display(), api = %config.api_base_url, "starting");

    let backend = FsBackend::new(data_dir.clone());
    let state = AppState::load(backend, config.storage_key.clone())?;
    let generator =
        HttpGenerator::with_timeout(config.api_base_url.clone(), config.request_timeout())?;

    Ok(AppContext {
        api: LicenPrepApi::new(state, generator),
        data_dir,
        config,
    })
}

fn handle_dashboard(ctx: &AppContext) -> Result<()> {
    print_dashboard(&ctx.api.dashboard());
    Ok(())
}

fn handle_textbooks(ctx: &mut AppContext, action: Option<TextbookAction>) -> Result<()> {
    match action.unwrap_or(TextbookAction::List) {
        TextbookAction::List => {
            print_textbooks(ctx.api.state().textbooks());
        }
        TextbookAction::Add { path, title } => {
            let result = ctx.api.register_textbook(&path, title.as_deref())?;
            print_messages(&result.messages);
        }
        TextbookAction::Status { id, status } => {
            let status: TextbookStatus = status.parse().map_err(LicenPrepError::Validation)?;
            let result = ctx.api.set_textbook_status(&id, status);
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn handle_practice(ctx: &mut AppContext) -> Result<()> {
    let stdin = std::io::stdin();
    run_practice(&mut ctx.api, stdin.lock())
}

fn handle_generate(ctx: &mut AppContext, args: GenerateArgs) -> Result<()> {
    let request = GenerateRequest::new(args.category)
        .with_query(args.query)
        .with_k(args.k)
        .with_num_questions(args.num_questions);

    println!("Generating questions for {}...", request.category);
    let result = ctx.api.generate_quiz(&request)?;
    print_question_list(&result.affected_questions);
    print_messages(&result.messages);
    Ok(())
}

fn handle_review(ctx: &mut AppContext, action: Option<ReviewAction>) -> Result<()> {
    match action.unwrap_or(ReviewAction::List { bucket: None }) {
        ReviewAction::List { bucket } => {
            let only = bucket.as_deref().map(parse_bucket).transpose()?;
            print_board(ctx.api.state().faculty(), only);
        }
        ReviewAction::Move { id, from, to } => {
            let result = ctx.api.move_question(&id, parse_bucket(&from)?, parse_bucket(&to)?);
            print_messages(&result.messages);
        }
        ReviewAction::ApproveAll => {
            let result = ctx.api.approve_all();
            print_question_list(&result.affected_questions);
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn handle_settings(ctx: &mut AppContext, action: Option<SettingsAction>) -> Result<()> {
    match action.unwrap_or(SettingsAction::Show) {
        SettingsAction::Show => print_settings(ctx.api.state().settings(), &ctx.config),
        SettingsAction::Set {
            model,
            budget,
            theme,
            api_url,
            timeout,
        } => {
            let theme = theme
                .as_deref()
                .map(|t| t.parse::<Theme>())
                .transpose()
                .map_err(LicenPrepError::Validation)?;
            let update = SettingsUpdate {
                model_tier: model,
                token_budget: budget,
                theme,
            };
            validate_settings(&update)?;

            let service_changed = api_url.is_some() || timeout.is_some();
            if service_changed {
                // Start from the file, not the env-overridden config in ctx.
                let mut stored = AppConfig::load(&ctx.data_dir)?;
                if let Some(url) = api_url.as_deref() {
                    stored.set_api_base_url(url);
                }
                if let Some(secs) = timeout {
                    stored.request_timeout_secs = (secs > 0).then_some(secs);
                }
                stored.save(&ctx.data_dir)?;
                print_messages(&[CmdMessage::success(format!(
                    "Generation service set to {}",
                    stored.api_base_url
                ))]);
            }

            if !update.is_empty() || !service_changed {
                let result = ctx.api.submit_settings(update)?;
                print_messages(&result.messages);
            }
        }
    }
    Ok(())
}

fn parse_bucket(s: &str) -> Result<Bucket> {
    s.parse().map_err(LicenPrepError::Validation)
}
