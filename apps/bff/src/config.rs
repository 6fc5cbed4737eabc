//! # BFF 設定
//!
//! 環境変数から BFF サーバーの設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `BFF_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `BFF_PORT` | **Yes** | ポート番号 |
//! | `AUTH_URL` | **Yes** | Auth Service の URL |
//! | `BOOKING_URL` | **Yes** | Booking Service の URL |
//! | `ECOMMERCE_URL` | **Yes** | E-commerce Service の URL |
//! | `TENANT_URL` | **Yes** | Tenant Service の URL |
//! | `GATEWAY_SERVICES` | No | 汎用プロキシの転送先（`name=url,name=url`） |
//! | `WELL_KNOWN_DIR` | No | ディープリンク検証ファイルの配置先（デフォルト: `./well-known`） |

use std::{collections::HashMap, env, path::PathBuf};

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// 汎用プロキシのサービス名 → ベース URL 対応表
///
/// 起動時に一度だけ構築し、以降は変更しない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceUrlMap(HashMap<String, String>);

impl ServiceUrlMap {
    /// `name=url,name=url` 形式の文字列をパースする
    ///
    /// 空文字列は空の対応表になる。URL 末尾の `/` は取り除く。
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut map = HashMap::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let invalid = || ConfigError::Invalid {
                name:  "GATEWAY_SERVICES",
                value: entry.to_string(),
            };
            let (name, base_url) = entry.split_once('=').ok_or_else(invalid)?;
            let (name, base_url) = (name.trim(), base_url.trim());
            if name.is_empty() || url::Url::parse(base_url).is_err() {
                return Err(invalid());
            }
            map.insert(
                name.to_string(),
                base_url.trim_end_matches('/').to_string(),
            );
        }
        Ok(Self(map))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into().trim_end_matches('/').to_string()))
                .collect(),
        )
    }

    /// サービス名からベース URL を解決する
    pub fn resolve(&self, service: &str) -> Option<&str> {
        self.0.get(service).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// BFF サーバーの設定
#[derive(Debug, Clone)]
pub struct BffConfig {
    /// バインドアドレス
    pub host:             String,
    /// ポート番号
    pub port:             u16,
    pub auth_url:         String,
    pub booking_url:      String,
    pub ecommerce_url:    String,
    pub tenant_url:       String,
    pub gateway_services: ServiceUrlMap,
    pub well_known_dir:   PathBuf,
}

impl BffConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    ///
    /// テストでプロセスの環境変数を書き換えずに検証するために分離している。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));
        let required_url = |name: &'static str| {
            let value = required(name)?;
            match url::Url::parse(&value) {
                Ok(_) => Ok(value.trim_end_matches('/').to_string()),
                Err(_) => Err(ConfigError::Invalid { name, value }),
            }
        };

        let port_raw = required("BFF_PORT")?;
        let port = port_raw.parse().map_err(|_| ConfigError::Invalid {
            name:  "BFF_PORT",
            value: port_raw.clone(),
        })?;

        Ok(Self {
            host: lookup("BFF_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            auth_url: required_url("AUTH_URL")?,
            booking_url: required_url("BOOKING_URL")?,
            ecommerce_url: required_url("ECOMMERCE_URL")?,
            tenant_url: required_url("TENANT_URL")?,
            gateway_services: ServiceUrlMap::parse(
                &lookup("GATEWAY_SERVICES").unwrap_or_default(),
            )?,
            well_known_dir: lookup("WELL_KNOWN_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./well-known")),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("BFF_PORT", "3000"),
        ("AUTH_URL", "http://localhost:4001/"),
        ("BOOKING_URL", "http://localhost:4002"),
        ("ECOMMERCE_URL", "http://localhost:4003"),
        ("TENANT_URL", "http://localhost:4004"),
    ];

    #[test]
    fn test_必須項目のみでデフォルト値が補完される() {
        let config = BffConfig::from_lookup(lookup_from(REQUIRED)).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.auth_url, "http://localhost:4001");
        assert!(config.gateway_services.is_empty());
        assert_eq!(config.well_known_dir, PathBuf::from("./well-known"));
    }

    #[test]
    fn test_必須項目が欠けているとmissingを返す() {
        let pairs: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != "TENANT_URL")
            .collect();

        let result = BffConfig::from_lookup(lookup_from(&pairs));

        assert_eq!(result.unwrap_err(), ConfigError::Missing("TENANT_URL"));
    }

    #[test]
    fn test_ポート番号が不正だとinvalidを返す() {
        let mut pairs = REQUIRED.to_vec();
        pairs[0] = ("BFF_PORT", "http");

        let result = BffConfig::from_lookup(lookup_from(&pairs));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "BFF_PORT", .. })
        ));
    }

    #[test]
    fn test_service_url_mapは名前と末尾スラッシュ除去済みのurlを保持する() {
        let map =
            ServiceUrlMap::parse("payment=http://pay:8080/, media = http://media:9000").unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.resolve("payment"), Some("http://pay:8080"));
        assert_eq!(map.resolve("media"), Some("http://media:9000"));
        assert_eq!(map.resolve("unknown"), None);
    }

    #[test]
    fn test_service_url_mapは不正なエントリを拒否する() {
        assert!(ServiceUrlMap::parse("payment").is_err());
        assert!(ServiceUrlMap::parse("=http://pay:8080").is_err());
        assert!(ServiceUrlMap::parse("payment=not a url").is_err());
    }

    #[test]
    fn test_service_url_mapは空文字列で空になる() {
        assert!(ServiceUrlMap::parse("").unwrap().is_empty());
        assert!(ServiceUrlMap::parse(" , ").unwrap().is_empty());
    }
}
