use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use pss_core::{
    secret::{max_secret_len, secret_from_bytes, secret_to_bytes},
    EncodedShare, ShamirSSS, ShareSet, SharingConfig,
};
use rand::{CryptoRng, Rng};
use tracing::info;

#[derive(Clone, Copy, Debug)]
pub struct SplitParams {
    pub threshold: u32,
    pub total: u32,
}

/// Read one line, without its line terminator.
pub fn read_secret<R: BufRead>(mut reader: R) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("failed to read secret")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

/// Split `secret` and write one token per line to `out`.
pub fn split<R, W>(
    secret: &str,
    params: SplitParams,
    config: &SharingConfig,
    rng: &mut R,
    out: &mut W,
) -> Result<()>
where
    R: Rng + CryptoRng + ?Sized,
    W: Write,
{
    let shamir = ShamirSSS::new(params.threshold, params.total, config.clone())
        .context("invalid sharing parameters")?;
    let value = secret_from_bytes(secret.as_bytes(), config).with_context(|| {
        format!(
            "secret is {} bytes, only {} are guaranteed to fit",
            secret.len(),
            max_secret_len(config)
        )
    })?;

    let tokens = shamir.split_encoded(&value, rng)?;
    info!(
        threshold = params.threshold,
        total = params.total,
        "secret split"
    );
    for token in tokens {
        writeln!(out, "{token}")?;
    }
    Ok(())
}

/// Read parts until the sharing's threshold is met and return the secret.
///
/// Unparseable parts and parts from another sharing are reported to
/// `diagnostics` and skipped. Input after the last needed part is not read.
pub fn recover<I, S, W>(
    parts: I,
    config: &SharingConfig,
    diagnostics: &mut W,
) -> Result<String>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
    W: Write,
{
    let mut set = ShareSet::new();
    for part in parts {
        let part = part.context("failed to read part")?;
        let text = part.as_ref().trim();
        if text.is_empty() {
            continue;
        }

        let share = match text.parse::<EncodedShare>().and_then(|t| t.decode()) {
            Ok(share) => share,
            Err(err) => {
                writeln!(diagnostics, "Failed to parse part: {err}")?;
                continue;
            }
        };
        if let Err(err) = set.insert(share) {
            writeln!(diagnostics, "Part rejected: {err}")?;
            continue;
        }
        if set.is_complete() {
            break;
        }
    }

    if !set.is_complete() {
        match set.remaining() {
            Some(missing) => bail!("input ended {missing} part(s) short"),
            None => bail!("no valid parts given"),
        }
    }
    let secret = set.recover(config).context("failed to recover secret")?;
    String::from_utf8(secret_to_bytes(&secret))
        .context("recovered secret is not valid UTF-8")
}
