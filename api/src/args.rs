use std::{path::PathBuf, time::Duration};

use allerscan_core::{
    domain::common::{
        AllergenEvaluatorMode, AllergenPolicyConfig, AllerscanConfig, FoodReferenceConfig,
        LLMConfig, ScanConfig,
    },
    infrastructure::llm::gemini_client::DEFAULT_GEMINI_BASE_URL,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "allerscan-api", version, about = "AllerScan allergen scanning API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Skips installing the Prometheus recorder and the `/metrics` route.
    #[arg(long, env = "DISABLE_METRICS")]
    pub disable_metrics: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long, env = "GEMINI_API_KEY", default_value = "", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ScanArgs {
    /// Per inference call. 0 disables the timeout.
    #[arg(long, env = "INFERENCE_TIMEOUT_SECS", default_value_t = 30)]
    pub inference_timeout_secs: u64,

    #[arg(long, env = "ALLERGEN_EVALUATOR", default_value = "rule-based")]
    pub allergen_evaluator: AllergenEvaluatorMode,

    #[arg(
        long,
        env = "CRITICAL_ALLERGENS",
        value_delimiter = ',',
        default_value = "peanut,shellfish,tree nut"
    )]
    pub critical_allergens: Vec<String>,

    #[arg(long, env = "FOOD_REFERENCE_PATH")]
    pub food_reference_path: Option<PathBuf>,

    #[arg(long, env = "MAX_IMAGE_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_image_bytes: usize,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl From<Args> for AllerscanConfig {
    fn from(args: Args) -> Self {
        let inference_timeout = match args.scan.inference_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        AllerscanConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
            },
            scan: ScanConfig {
                inference_timeout,
                allergen_evaluator: args.scan.allergen_evaluator,
                max_image_bytes: args.scan.max_image_bytes,
            },
            allergen_policy: AllergenPolicyConfig {
                critical_allergens: args
                    .scan
                    .critical_allergens
                    .into_iter()
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect(),
            },
            food_reference: FoodReferenceConfig {
                dataset_path: args.scan.food_reference_path,
            },
        }
    }
}
