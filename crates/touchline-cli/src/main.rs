//! `touchline` — command-line client for the Touchline API.
//!
//! # Usage
//!
//! ```
//! touchline new-session
//! touchline --session <uuid> role scout
//! touchline --url http://localhost:5240 --session <uuid> discover --type player
//! touchline --config ~/.config/touchline/config.toml needs --status open
//! ```

mod client;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::{Deserialize, de::DeserializeOwned};
use touchline_core::{
  ProfileType, Role,
  club_need::{ClubNeed, NeedStatus, Urgency},
  contact::ContactState,
  profile::{Profile, ProfileAccess},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_URL: &str = "http://localhost:5240";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "touchline", about = "Command-line client for the Touchline API")]
struct Args {
  /// Path to a TOML config file (url, session).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the touchline server (default: http://localhost:5240).
  #[arg(long, env = "TOUCHLINE_URL")]
  url: Option<String>,

  /// Session id sent as `x-session-id`.
  #[arg(long, env = "TOUCHLINE_SESSION")]
  session: Option<Uuid>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print a fresh session id.
  NewSession,
  /// Show the session's role, onboarding state and contact quota.
  Session,
  /// Choose the session's role.
  Role { role: Role },
  /// Mark onboarding as complete.
  Onboard,
  /// Clear the role and onboarding state.
  SignOut,
  /// Ask whether a path may be visited, and where to go instead. Without a
  /// path, list the pages the session's role may reach.
  Nav { path: Option<String> },
  /// Show the permission row for a role.
  Permissions { role: String },
  /// View one profile.
  Profile { id: Uuid },
  /// List the profiles this session may view.
  Discover {
    #[arg(long = "type")]
    profile_type: Option<ProfileType>,
  },
  /// Send a contact request to a directory profile.
  Contact {
    target:  Uuid,
    #[arg(default_value = "")]
    message: String,
  },
  /// Show whether a contact request to a profile can be sent.
  ContactState { target: Uuid },
  /// List contact requests sent by this session.
  Sent,
  /// List club needs.
  Needs {
    #[arg(long)]
    club: Option<Uuid>,
    #[arg(long, value_parser = parse_lowercase::<NeedStatus>)]
    status: Option<NeedStatus>,
  },
  /// Post a club need.
  PostNeed {
    position: String,
    #[arg(long, default_value = "medium", value_parser = parse_lowercase::<Urgency>)]
    urgency: Urgency,
    #[arg(long, default_value = "")]
    description: String,
  },
  /// Change a club need's status (open, filled, closed).
  NeedStatus {
    id: Uuid,
    #[arg(value_parser = parse_lowercase::<NeedStatus>)]
    status: NeedStatus,
  },
  /// Delete a club need.
  DeleteNeed { id: Uuid },
}

/// Parse a lowercase wire name (`open`, `high`, ..) through its serde form.
fn parse_lowercase<T: DeserializeOwned>(s: &str) -> Result<T, String> {
  serde_json::from_value(serde_json::Value::String(s.trim().to_lowercase()))
    .map_err(|_| format!("unrecognised value `{s}`"))
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:     String,
  #[serde(default)]
  session: Option<Uuid>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  if let Command::NewSession = args.command {
    println!("{}", Uuid::new_v4());
    return Ok(());
  }

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let Some(session) = args.session.or(file_cfg.session) else {
    bail!("no session id; pass --session, set TOUCHLINE_SESSION, or run `touchline new-session`");
  };
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
    session,
  };
  tracing::debug!(url = %api_config.base_url, %session, "using API");

  let client = ApiClient::new(api_config)?;
  run(&client, args.command).await
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::NewSession => println!("{}", Uuid::new_v4()),
    Command::Session => {
      let s = client.summary().await?;
      println!("session     {}", s.session_id);
      match s.role {
        Some(role) => println!("role        {role}"),
        None => println!("role        (none)"),
      }
      println!("onboarded   {}", s.onboarding_complete);
      println!(
        "contacts    {} sent, {} remaining",
        s.contact_requests_sent, s.contact_requests_remaining
      );
    }
    Command::Role { role } => {
      let s = client.set_role(role).await?;
      println!("role set to {role}; {} contact requests available", s.contact_requests_remaining);
    }
    Command::Onboard => {
      client.complete_onboarding().await?;
      println!("onboarding complete");
    }
    Command::SignOut => {
      client.sign_out().await?;
      println!("signed out");
    }
    Command::Nav { path: None } => {
      let s = client.summary().await?;
      if s.navigation.is_empty() {
        println!("no role selected");
      }
      for page in &s.navigation {
        println!("{page}");
      }
    }
    Command::Nav { path: Some(path) } => {
      let nav = client.navigate(&path).await?;
      match nav.redirect {
        Some(to) if !nav.allowed => println!("redirect → {to}"),
        _ => println!("allowed"),
      }
    }
    Command::Permissions { role } => {
      let row = client.permissions(&role).await?;
      println!("{}", serde_json::to_string_pretty(&row)?);
    }
    Command::Profile { id } => match client.profile(id).await? {
      ProfileAccess::Visible { profile } => print_profile(&profile),
      ProfileAccess::NotFound => println!("profile not found"),
      ProfileAccess::Restricted { profile_type } => {
        println!("restricted: your role cannot view {profile_type} profiles")
      }
    },
    Command::Discover { profile_type } => {
      let profiles = client.discover(profile_type).await?;
      if profiles.is_empty() {
        println!("no profiles");
      }
      for p in &profiles {
        println!("{}  {:<16} {}", p.id, p.profile_type, p.display_name);
      }
    }
    Command::Contact { target, message } => {
      let sent = client.contact(target, &message).await?;
      println!("contact request sent to {}", sent.target_name);
      let s = client.summary().await?;
      println!("{} remaining", s.contact_requests_remaining);
    }
    Command::ContactState { target } => {
      let t = client.target_state(target).await?;
      let Some(state) = t.state else {
        println!("{}", if t.sent { "already sent" } else { "unknown profile" });
        return Ok(());
      };
      let verdict = if state.can_send() { "can send" } else { "cannot send" };
      match state {
        ContactState::Available { remaining } => println!("{verdict} ({remaining} remaining)"),
        ContactState::AlreadySent => println!("{verdict}: already sent"),
        ContactState::QuotaExhausted => println!("{verdict}: quota exhausted"),
        ContactState::NotPermitted => println!("{verdict}: role may not contact this profile"),
      }
    }
    Command::Sent => {
      for r in client.contact_requests().await? {
        println!(
          "{}  {:<16} {}  {}",
          r.created_at.format("%Y-%m-%d %H:%M"),
          r.target_type,
          r.target_name,
          r.message
        );
      }
    }
    Command::Needs { club, status } => {
      let needs = client.club_needs(club, status).await?;
      if needs.is_empty() {
        println!("no club needs");
      }
      for need in &needs {
        print_need(need);
      }
    }
    Command::PostNeed { position, urgency, description } => {
      let need = client.post_need(&position, urgency, &description).await?;
      print_need(&need);
    }
    Command::NeedStatus { id, status } => {
      let need = client.set_need_status(id, status).await?;
      print_need(&need);
    }
    Command::DeleteNeed { id } => {
      client.delete_need(id).await?;
      println!("deleted {id}");
    }
  }
  Ok(())
}

fn print_profile(p: &Profile) {
  println!("{}  ({})", p.display_name, p.profile_type);
  for (label, value) in [
    ("headline", &p.headline),
    ("location", &p.location),
    ("club", &p.club),
    ("position", &p.position),
  ] {
    if let Some(v) = value {
      println!("  {label:<9} {v}");
    }
  }
}

fn print_need(need: &ClubNeed) {
  println!(
    "{}  {:<7} {:?}  {}",
    need.id, need.status, need.urgency, need.position
  );
  if !need.description.is_empty() {
    println!("    {}", need.description);
  }
}
