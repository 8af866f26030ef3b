use anyhow::Result;
use chrono::TimeDelta;
use daily_report_http::{issue_token, AuthConfig};

use crate::config::get_auth_secret;

pub(crate) fn run(subject: &str, ttl_hours: i64) -> Result<()> {
    let subject = subject.trim();
    if subject.is_empty() {
        anyhow::bail!("subject must not be empty");
    }
    if ttl_hours <= 0 {
        anyhow::bail!("ttl-hours must be positive, got {ttl_hours}");
    }
    let config = AuthConfig::new(get_auth_secret()?);
    let ttl = TimeDelta::try_hours(ttl_hours)
        .ok_or_else(|| anyhow::anyhow!("ttl-hours {ttl_hours} is out of range"))?;
    let token = issue_token(subject, ttl, &config)?;
    println!("{token}");
    Ok(())
}
