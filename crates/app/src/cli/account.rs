use clap::Args;
use storefront::token::SessionToken;

use super::{CliError, Context};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Session token issued by the backend
    #[arg(long, env = "STOREFRONT_TOKEN", hide_env_values = true)]
    token: String,
}

pub(crate) fn login(context: &mut Context, args: LoginArgs) -> Result<(), CliError> {
    let token = SessionToken::new(args.token)
        .ok_or_else(|| CliError::Usage("token cannot be empty".to_owned()))?;

    context.session.set_token(token);
    println!("logged in");

    Ok(())
}

pub(crate) fn logout(context: &mut Context) {
    context.session.logout();
    println!("logged out");
}
