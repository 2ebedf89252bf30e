//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use domain::Role;

/// StarMaker audition registry - singers, judges and evaluation orders
#[derive(Parser, Debug)]
#[command(name = "starmaker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in as a singer, judge or admin
    Login(LoginArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Show who is signed in
    Whoami,

    /// Manage singer accounts (admin)
    Singers {
        #[command(subcommand)]
        action: SingerAction,
    },

    /// Manage judge accounts (admin)
    Judges {
        #[command(subcommand)]
        action: JudgeAction,
    },

    /// Review assigned orders (judge)
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },

    /// Your own profile and scores (singer)
    Me {
        #[command(subcommand)]
        action: MeAction,
    },
}

/// Role chosen on the landing screen
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    Singer,
    Judge,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Singer => Role::Singer,
            RoleArg::Judge => Role::Judge,
            RoleArg::Admin => Role::Admin,
        }
    }
}

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Role to sign in as
    #[arg(value_enum)]
    pub role: RoleArg,

    /// Public code, e.g. SM-4821 (not used for admin)
    #[arg(long)]
    pub id: Option<String>,

    /// Password; prompted for when omitted
    #[arg(short, long, env = "STARMAKER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for editing an account
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Internal id of the account
    pub id: Uuid,

    /// New display name
    #[arg(long)]
    pub name: String,

    /// New public login code
    #[arg(long)]
    pub code: String,

    /// New password
    #[arg(long)]
    pub password: String,
}

/// Arguments for deleting an account
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Internal id of the account
    pub id: Uuid,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Singer administration actions
#[derive(Subcommand, Debug)]
pub enum SingerAction {
    /// List all singers
    List,
    /// Mint a new singer account
    Create,
    /// Overwrite name, code and password
    Edit(EditArgs),
    /// Permanently delete a singer and its orders
    Delete(DeleteArgs),
    /// Suspend a singer
    Ban {
        id: Uuid,
    },
    /// Lift a suspension
    Unban {
        id: Uuid,
    },
    /// Assign an evaluation order to a singer
    Assign {
        /// Internal id of the singer
        singer_id: Uuid,
        /// Internal id of the judge who will score it
        #[arg(long)]
        judge: Option<Uuid>,
        /// Performance title
        #[arg(long)]
        title: Option<String>,
    },
}

/// Judge administration actions
#[derive(Subcommand, Debug)]
pub enum JudgeAction {
    /// List all judges
    List,
    /// Mint a new judge account
    Create,
    /// Overwrite name, code and password
    Edit(EditArgs),
    /// Permanently delete a judge (assigned orders are kept)
    Delete(DeleteArgs),
}

/// Judge order actions
#[derive(Subcommand, Debug)]
pub enum OrderAction {
    /// Orders waiting for your score
    Pending,
    /// Score a pending order (0-100)
    Score {
        singer_id: Uuid,
        order_id: Uuid,
        score: String,
    },
}

/// Singer self-service actions
#[derive(Subcommand, Debug)]
pub enum MeAction {
    /// Profile, status and score history
    Show,
    /// Switch between live and offline
    ToggleOnline,
    /// Set display name and avatar
    Profile {
        #[arg(long)]
        name: String,
        /// Image file to use as avatar
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_login() {
        let cli = Cli::parse_from(["starmaker", "login", "singer", "--id", "SM-4821", "-p", "7734"]);
        match cli.command {
            Commands::Login(args) => {
                assert_eq!(args.role, RoleArg::Singer);
                assert_eq!(args.id.as_deref(), Some("SM-4821"));
                assert_eq!(args.password.as_deref(), Some("7734"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_assign_without_judge() {
        let id = Uuid::new_v4();
        let cli = Cli::parse_from(["starmaker", "singers", "assign", &id.to_string()]);
        assert!(matches!(
            cli.command,
            Commands::Singers {
                action: SingerAction::Assign { judge: None, .. }
            }
        ));
    }
}
