use crate::config::normalize_iata;
use crate::core::Storage;
use crate::utils::error::{Result, RouteMapError};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

pub const SOURCE_PROMPT: &str = "Enter Source Airport IATA Code: ";
pub const DESTINATION_PROMPT: &str = "Enter Destination Airport IATA Code: ";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

/// 顯示提示並讀取一行 IATA 代碼
pub fn prompt_iata<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<String> {
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(RouteMapError::MissingConfigError {
            field: prompt.trim_end_matches([':', ' ']).to_string(),
        });
    }
    Ok(normalize_iata(&line))
}

/// 將執行結果寫到使用者輸出；找不到機場時只印訊息並視為正常結束
pub fn report_run<W: Write>(result: Result<String>, output: &mut W) -> Result<()> {
    match result {
        Ok(output_path) => {
            tracing::info!("✅ Map rendered successfully!");
            writeln!(output, "📁 Map saved to: {}", output_path)?;
            Ok(())
        }
        Err(e @ RouteMapError::AirportNotFound { .. }) => {
            tracing::warn!("{}", e);
            writeln!(output, "{}", e.user_friendly_message())?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Use the value given on the command line, or ask for it.
pub fn resolve_iata<R: BufRead, W: Write>(
    given: Option<&str>,
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    match given {
        Some(code) => Ok(normalize_iata(code)),
        None => prompt_iata(prompt, input, output),
    }
}
