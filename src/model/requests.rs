/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use serde::Serialize;

/// Form body of the legacy `login.php` POST
#[derive(Serialize)]
pub struct LoginForm<'a> {
    /// Account name
    pub username: &'a str,
    /// Account password
    pub password: &'a str,
}

/// Query string of an `ajax.php` call
///
/// `action` always comes first, then the caller parameters, then `auth`
/// when the session runs in legacy form-login mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AjaxQuery<'a> {
    /// Action name, passed through untouched
    pub action: &'a str,
    /// Extra parameters supplied by the caller
    pub params: &'a [(&'a str, &'a str)],
    /// Session authkey in legacy mode
    pub authkey: Option<&'a str>,
}

impl<'a> AjaxQuery<'a> {
    /// Flattens the query into ordered key/value pairs
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'a str, &'a str)> {
        let mut pairs = Vec::with_capacity(self.params.len() + 2);
        pairs.push(("action", self.action));
        pairs.extend(self.params.iter().copied());
        if let Some(authkey) = self.authkey {
            pairs.push(("auth", authkey));
        }
        pairs
    }
}
