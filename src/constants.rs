/// Path of the JSON API endpoint, relative to the site URL
pub const AJAX_PATH: &str = "ajax.php";
/// Path of the legacy login form, relative to the site URL
pub const LOGIN_PATH: &str = "login.php";
/// Action used after a form login to fetch the user id and authkey
pub const INDEX_ACTION: &str = "index";
/// Value of the `status` field on a successful API call
pub const STATUS_SUCCESS: &str = "success";
/// Upper bound in seconds for any single HTTP call
pub const HTTP_TIMEOUT_SECS: u64 = 30;
/// Maximum number of redirects followed by the login POST
pub const LOGIN_MAX_REDIRECTS: usize = 10;
/// Environment variable naming the site configuration file
pub const CONFIG_PATH_ENV: &str = "GAZELLE_CONFIG";
/// Configuration file used when `GAZELLE_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "gazelle.toml";
/// User agent string sent to the tracker, matching a desktop browser
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
/// Accept header sent with every request
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
/// Accept-Language header sent with every request
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.8";
/// Accept-Charset header sent with every request
pub const ACCEPT_CHARSET: &str = "utf-8, ISO-8859-1;q=0.7,*;q=0.3";
/// Cache-Control header sent with every request
pub const CACHE_CONTROL: &str = "max-age=0";
