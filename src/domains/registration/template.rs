use askama::Template;

pub const WELCOME_SUBJECT: &str = "Welcome to RoyalForge - The Free Cuban Economy";

#[derive(Template)]
#[template(path = "welcome.html")]
pub struct WelcomeEmail<'a> {
  pub full_name: &'a str,
  pub email: &'a str,
  pub company: Option<&'a str>,
  pub role: &'a str,
  pub referral_source: &'a str,
}
