use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::model::RankedPick;
use crate::teams;

/// Pool-site login credentials, prompted or taken from the environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Interactive prompt; the password is read without echo.
    pub fn prompt() -> Result<Self> {
        print!("Username: ");
        std::io::stdout().flush()?;
        let mut username = String::new();
        std::io::stdin()
            .read_line(&mut username)
            .context("Failed to read username")?;

        let password = rpassword::prompt_password("Password (hidden): ")
            .context("Failed to read password")?;

        Ok(Credentials {
            username: username.trim().to_string(),
            password,
        })
    }
}

/// Client for the confidence-pool hosting site. The session is cookie
/// based: `login` must succeed before the picksheet calls.
pub struct PoolClient {
    http: Client,
    base_url: String,
}

impl PoolClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(PoolClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn absolute(&self, action: &str) -> String {
        if action.starts_with("http://") || action.starts_with("https://") {
            action.to_string()
        } else {
            format!("{}/{}", self.base_url, action.trim_start_matches('/'))
        }
    }

    /// Find the login form on the landing page and post credentials
    /// through it, hidden fields included.
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        info!("Logging in to {}", self.base_url);

        let html = self.get_text(&self.base_url).await?;
        let form = parse_form(&html, "login_process")
            .context("No login form found on the pool homepage")?;

        let mut fields = form.hidden.clone();
        fields.push(("username".to_string(), credentials.username.clone()));
        fields.push(("password".to_string(), credentials.password.clone()));

        let url = self.absolute(&form.action);
        let resp = self
            .http
            .post(&url)
            .form(&fields)
            .send()
            .await
            .context("Login request failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("Login failed: {}", resp.status());
        }
        Ok(())
    }

    /// Fetch and parse the legacy confidence picksheet form.
    pub async fn fetch_picksheet(&self) -> Result<PickForm> {
        info!("Getting pick sheet");

        let url = format!(
            "{}/nfl/confidence/picksheet_legacy.cfm?version=1",
            self.base_url
        );
        let html = self.get_text(&url).await?;
        parse_picksheet(&html)
    }

    /// Post the ranked slate: one radio per game selecting the
    /// favorite, the matching points field, and the tiebreaker.
    pub async fn submit_picks(
        &self,
        form: &PickForm,
        picks: &[RankedPick],
        tiebreaker_points: u32,
    ) -> Result<()> {
        info!("Submitting {} picks", picks.len());

        let fields = build_pick_fields(form, picks, tiebreaker_points)?;
        let url = self.absolute(&form.action);
        let resp = self
            .http
            .post(&url)
            .form(&fields)
            .send()
            .await
            .context("Pick submission failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("Pick submission failed: {}", resp.status());
        }
        Ok(())
    }

    /// Fetch the printable pick-review page and stage it in a temp
    /// file with a `<base href>` so relative assets still resolve.
    pub async fn fetch_review(&self, sheet_id: u32, week: u32) -> Result<PathBuf> {
        info!("Getting pick review sheet");

        let url = format!(
            "{}/nfl/confidence/print_picks.cfm?sheet_id={}&week={}",
            self.base_url, sheet_id, week
        );
        let html = self.get_text(&url).await?;
        let html = inject_base_href(&html, &self.base_url);

        let path = std::env::temp_dir().join("picks.html");
        std::fs::write(&path, html)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request failed: {}", url))?;
        if !resp.status().is_success() {
            anyhow::bail!("{} returned {}", url, resp.status());
        }
        Ok(resp.text().await?)
    }
}

/// A parsed HTML form: where it posts, its hidden fields, and the
/// radio groups keyed by radio value.
#[derive(Debug, Clone)]
pub struct PickForm {
    pub action: String,
    pub hidden: Vec<(String, String)>,
    /// radio value -> input name (the picksheet names each game's
    /// radio group and points field after the game's field id)
    pub radios: HashMap<String, String>,
}

fn parse_form(html: &str, action_fragment: &str) -> Option<PickForm> {
    let doc = Html::parse_document(html);
    let form_sel = Selector::parse("form").ok()?;
    let input_sel = Selector::parse("input").ok()?;

    for form in doc.select(&form_sel) {
        let action = form.value().attr("action").unwrap_or("");
        if !action.to_lowercase().contains(&action_fragment.to_lowercase()) {
            continue;
        }

        let mut hidden = Vec::new();
        let mut radios = HashMap::new();
        for input in form.select(&input_sel) {
            let name = match input.value().attr("name") {
                Some(n) => n.to_string(),
                None => continue,
            };
            let value = input.value().attr("value").unwrap_or("").to_string();
            match input.value().attr("type").map(str::to_lowercase).as_deref() {
                Some("hidden") => hidden.push((name, value)),
                Some("radio") => {
                    radios.insert(value, name);
                }
                _ => {}
            }
        }

        return Some(PickForm {
            action: action.to_string(),
            hidden,
            radios,
        });
    }
    None
}

fn parse_picksheet(html: &str) -> Result<PickForm> {
    let form = parse_form(html, "picksheet_legacy_process")
        .context("No picksheet form found; is the login session valid?")?;
    if form.radios.is_empty() {
        anyhow::bail!("Picksheet form has no team radio buttons");
    }
    Ok(form)
}

/// Pair each ranked favorite with its game field: the radio selects
/// the team (by the pool's team numbering) and a same-named field
/// carries the confidence points. Ends with the tiebreaker score.
fn build_pick_fields(
    form: &PickForm,
    picks: &[RankedPick],
    tiebreaker_points: u32,
) -> Result<Vec<(String, String)>> {
    let mut fields = form.hidden.clone();

    for pick in picks {
        let team_id = teams::pool_team_id(pick.game.favorite).to_string();
        let game_field = form.radios.get(&team_id).with_context(|| {
            format!(
                "Picksheet has no radio button for {} (pool team id {})",
                pick.game.favorite, team_id
            )
        })?;
        fields.push((game_field.clone(), team_id));
        fields.push((game_field.clone(), pick.confidence.to_string()));
    }

    fields.push(("tiebreak".to_string(), tiebreaker_points.to_string()));
    Ok(fields)
}

fn inject_base_href(html: &str, base_url: &str) -> String {
    let tag = format!("<base href=\"{}\">", base_url);
    match html.find("<head>") {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + tag.len());
            out.push_str(&html[..pos + "<head>".len()]);
            out.push_str(&tag);
            out.push_str(&html[pos + "<head>".len()..]);
            out
        }
        None => format!("{}{}", tag, html),
    }
}

/// Hand the staged review page to the platform's default opener.
pub fn open_in_browser(path: &std::path::Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut cmd = {
        let mut c = std::process::Command::new("open");
        c.arg(path);
        c
    };
    #[cfg(target_os = "windows")]
    let mut cmd = {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut cmd = {
        let mut c = std::process::Command::new("xdg-open");
        c.arg(path);
        c
    };

    cmd.spawn()
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Game, TeamId};
    use rust_decimal_macros::dec;

    const PICKSHEET_HTML: &str = r#"
        <html><body>
        <form action="/nfl/confidence/picksheet_legacy_process.cfm" method="post">
            <input type="hidden" name="sheet_id" value="1">
            <input type="radio" name="101" value="15"> Dallas
            <input type="radio" name="101" value="16"> NY Giants
            <input name="101" size="2">
            <input type="radio" name="102" value="22"> Green Bay
            <input type="radio" name="102" value="20"> Chicago
            <input name="102" size="2">
            <input type="text" name="tiebreak" size="3">
            <input type="submit" value="Save">
        </form>
        </body></html>
    "#;

    fn pick(favorite: TeamId, underdog: TeamId, confidence: u32) -> RankedPick {
        RankedPick {
            game: Game {
                favorite,
                underdog,
                home_team: favorite,
                spread: dec!(-3),
                total_points: dec!(0),
                raw_favorite: format!("{}", favorite),
                raw_underdog: format!("{}", underdog),
            },
            confidence,
        }
    }

    #[test]
    fn test_parse_picksheet() {
        let form = parse_picksheet(PICKSHEET_HTML).unwrap();
        assert_eq!(form.action, "/nfl/confidence/picksheet_legacy_process.cfm");
        assert_eq!(form.hidden, vec![("sheet_id".to_string(), "1".to_string())]);
        // Dallas is pool team 15 in game field 101
        assert_eq!(form.radios.get("15"), Some(&"101".to_string()));
        assert_eq!(form.radios.get("22"), Some(&"102".to_string()));
    }

    #[test]
    fn test_parse_form_ignores_other_forms() {
        let html = r#"
            <form action="/search.cfm"><input type="text" name="q"></form>
            <form action="/LOGIN_PROCESS.cfm">
                <input type="hidden" name="csrf" value="abc">
            </form>
        "#;
        let form = parse_form(html, "login_process").unwrap();
        assert_eq!(form.action, "/LOGIN_PROCESS.cfm");
        assert_eq!(form.hidden, vec![("csrf".to_string(), "abc".to_string())]);
    }

    #[test]
    fn test_build_pick_fields() {
        let form = parse_picksheet(PICKSHEET_HTML).unwrap();
        let picks = vec![
            pick(TeamId::GreenBay, TeamId::Chicago, 16),
            pick(TeamId::Dallas, TeamId::NyGiants, 15),
        ];

        let fields = build_pick_fields(&form, &picks, 42).unwrap();
        assert_eq!(
            fields,
            vec![
                ("sheet_id".to_string(), "1".to_string()),
                ("102".to_string(), "22".to_string()),
                ("102".to_string(), "16".to_string()),
                ("101".to_string(), "15".to_string()),
                ("101".to_string(), "15".to_string()),
                ("tiebreak".to_string(), "42".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_pick_fields_missing_radio() {
        let form = parse_picksheet(PICKSHEET_HTML).unwrap();
        let picks = vec![pick(TeamId::Seattle, TeamId::Arizona, 16)];
        let err = build_pick_fields(&form, &picks, 42).unwrap_err();
        assert!(err.to_string().contains("Seattle"));
    }

    #[test]
    fn test_inject_base_href() {
        let html = "<html><head><title>Picks</title></head><body></body></html>";
        let out = inject_base_href(html, "https://pool.example.com");
        assert!(out.starts_with("<html><head><base href=\"https://pool.example.com\">"));
    }

    #[test]
    fn test_inject_base_href_headless_document() {
        let out = inject_base_href("<p>hi</p>", "https://pool.example.com");
        assert!(out.starts_with("<base href="));
    }
}
