//! Session command implementation.

use std::fmt::Write as _;

use casebook_session::{Permission, Role, Session};
use clap::Parser;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, IconContext};

/// Decode a login token and show what it allows
#[derive(Debug, Parser)]
pub struct SessionCommand {
    /// Login token, as issued by the case API
    #[arg(long, env = "CASEBOOK_TOKEN", hide_env_values = true)]
    token: String,
}

impl SessionCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let session = Session::from_token(&self.token)?;
        tracing::debug!(role = %session.role(), "decoded session");
        print_output(ctx, &SessionReport::new(&session, IconContext::new()))
    }
}

/// Who a token belongs to and what they may do.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    pub permissions: Vec<Permission>,
    #[serde(skip)]
    icons: IconContext,
}

impl SessionReport {
    pub fn new(session: &Session, icons: IconContext) -> Self {
        let claims = session.claims();
        Self {
            id: claims.id.clone(),
            name: claims.name.clone(),
            email: claims.email.clone(),
            role: session.role(),
            district: claims.district.clone(),
            expires_at: claims.expires_at().map(|at| at.to_rfc3339()),
            permissions: session.role().permissions(),
            icons,
        }
    }
}

impl FormattedOutput for SessionReport {
    fn format_text(&self) -> String {
        let mut out = format!("{} <{}>\n", self.name, self.email);
        let _ = writeln!(out, "  id:       {}", self.id);
        let _ = writeln!(out, "  role:     {}", self.role);
        if let Some(district) = &self.district {
            let _ = writeln!(out, "  district: {district}");
        }
        let _ = writeln!(
            out,
            "  expires:  {}",
            self.expires_at.as_deref().unwrap_or("never")
        );

        out.push_str("\nPermissions:\n");
        for permission in Permission::iter() {
            let mark = if self.permissions.contains(&permission) {
                self.icons.check()
            } else {
                self.icons.cross()
            };
            let _ = writeln!(out, "  {mark} {permission}");
        }

        out.trim_end().to_string()
    }
}
