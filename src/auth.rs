//! Login gate for the interactive shell
//!
//! A single configured username/password pair. This keeps casual users out
//! of the shell; it is not a security boundary.

use std::io::{BufRead, Write};

use crate::config::Credentials;
use crate::error::{LibraryError, LibraryResult};

/// Login attempts allowed before the shell refuses to start
pub const MAX_ATTEMPTS: usize = 3;

/// Check a username/password pair against the configured credential.
///
/// Surrounding whitespace is ignored on both values.
pub fn verify(credentials: &Credentials, username: &str, password: &str) -> LibraryResult<()> {
    if username.trim() == credentials.username && password.trim() == credentials.password {
        Ok(())
    } else {
        Err(LibraryError::Auth("Invalid username or password".into()))
    }
}

/// Values given up front (flags or environment) instead of prompting
#[derive(Debug, Clone, Default)]
pub struct SuppliedLogin {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Run the login gate.
///
/// Missing values are prompted for: the username is read from `input`, the
/// password without echo. When both values were supplied up front a single
/// attempt is made. Returns the accepted username.
pub fn login<R: BufRead, W: Write>(
    credentials: &Credentials,
    supplied: &SuppliedLogin,
    input: &mut R,
    out: &mut W,
) -> LibraryResult<String> {
    let attempts = if supplied.username.is_some() && supplied.password.is_some() {
        1
    } else {
        MAX_ATTEMPTS
    };

    for attempt in 1..=attempts {
        let username = match &supplied.username {
            Some(name) => name.clone(),
            None => prompt_line(input, out, "Username: ")?,
        };
        let password = match &supplied.password {
            Some(password) => password.clone(),
            None => rpassword::prompt_password("Password: ")
                .map_err(|e| LibraryError::Auth(format!("Failed to read password: {}", e)))?,
        };

        match verify(credentials, &username, &password) {
            Ok(()) => {
                tracing::info!(user = %username.trim(), "login accepted");
                return Ok(username.trim().to_string());
            }
            Err(e) if attempt < attempts => {
                tracing::warn!(attempt, "login rejected");
                writeln!(out, "{}", e)?;
            }
            Err(e) => {
                tracing::warn!(attempt, "login rejected, giving up");
                return Err(e);
            }
        }
    }

    Err(LibraryError::Auth("Too many failed attempts".into()))
}

fn prompt_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> LibraryResult<String> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(LibraryError::Auth("No username given".into()));
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn supplied(username: &str, password: &str) -> SuppliedLogin {
        SuppliedLogin {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    #[test]
    fn test_verify() {
        let credentials = Credentials::default();
        assert!(verify(&credentials, "admin", "admin123").is_ok());
        assert!(verify(&credentials, " admin ", "admin123 ").is_ok());
        assert!(matches!(
            verify(&credentials, "admin", "wrong"),
            Err(LibraryError::Auth(_))
        ));
        assert!(verify(&credentials, "Admin", "admin123").is_err());
    }

    #[test]
    fn test_login_with_supplied_values() {
        let credentials = Credentials::default();
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();

        let user = login(
            &credentials,
            &supplied("admin", "admin123"),
            &mut input,
            &mut out,
        )
        .unwrap();
        assert_eq!(user, "admin");
        assert!(out.is_empty());
    }

    #[test]
    fn test_login_supplied_wrong_password_fails_once() {
        let credentials = Credentials::default();
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();

        let err = login(&credentials, &supplied("admin", "nope"), &mut input, &mut out)
            .unwrap_err();
        assert!(matches!(err, LibraryError::Auth(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_login_prompts_for_username() {
        let credentials = Credentials::default();
        let mut input = Cursor::new(b"admin\n".to_vec());
        let mut out = Vec::new();
        let given = SuppliedLogin {
            username: None,
            password: Some("admin123".into()),
        };

        assert_eq!(login(&credentials, &given, &mut input, &mut out).unwrap(), "admin");
        assert_eq!(String::from_utf8(out).unwrap(), "Username: ");
    }

    #[test]
    fn test_login_retries_then_gives_up() {
        let credentials = Credentials::default();
        let mut input = Cursor::new(b"bob\neve\nmallory\nadmin\n".to_vec());
        let mut out = Vec::new();
        let given = SuppliedLogin {
            username: None,
            password: Some("admin123".into()),
        };

        assert!(login(&credentials, &given, &mut input, &mut out).is_err());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Username: ").count(), MAX_ATTEMPTS);
    }

    #[test]
    fn test_login_eof_on_username() {
        let credentials = Credentials::default();
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();
        let given = SuppliedLogin {
            username: None,
            password: Some("admin123".into()),
        };

        assert!(login(&credentials, &given, &mut input, &mut out).is_err());
    }
}
