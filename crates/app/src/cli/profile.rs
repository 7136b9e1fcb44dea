use clap::{Args, Subcommand};
use storefront::profile::UserProfile;
use storefront_app::shop::profile::{load_profile, update_profile};

use super::{CliError, Context};

#[derive(Debug, Args)]
pub(crate) struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProfileSubcommand {
    /// Show your profile
    Show,

    /// Change your name or email
    Update(UpdateArgs),
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New email address
    #[arg(long)]
    email: Option<String>,
}

pub(crate) async fn run(context: &mut Context, command: ProfileCommand) -> Result<(), CliError> {
    let api = &*context.api;
    let current = load_profile(&mut context.session, api).await?;

    match command.command {
        ProfileSubcommand::Show => print_profile(&current),
        ProfileSubcommand::Update(args) => {
            let edited = UserProfile {
                name: args.name.unwrap_or(current.name),
                email: args.email.unwrap_or(current.email),
            };

            update_profile(&mut context.session, api, edited).await?;

            if let Some(profile) = context.session.profile() {
                print_profile(profile);
            }
        }
    }

    Ok(())
}

fn print_profile(profile: &UserProfile) {
    println!("name: {}", profile.name);
    println!("email: {}", profile.email);
}
