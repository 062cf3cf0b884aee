// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use crate::error::{Error, Result};

use ureq::Agent;

/// A full-text index answering highlighting queries
pub trait FullTextIndex {
    /// Runs a query and returns the raw response body
    fn select(&self, params: &[(&str, String)]) -> Result<String>;
}

#[derive(Clone, Debug)]
pub struct Solr {
    agent: Agent,
    url: Option<String>,
}

impl Solr {
    /// An index at `url`; without one every query fails
    pub fn new(url: Option<&str>) -> Self {
        Self {
            agent: Agent::new(),
            url: url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }
}

impl FullTextIndex for Solr {
    fn select(&self, params: &[(&str, String)]) -> Result<String> {
        let url = match &self.url {
            Some(url) => format!("{}/select", url),
            None => return Err(Error::Index("no index url configured".into())),
        };

        let mut req = self.agent.get(&url);
        for (key, value) in params {
            req = req.query(key, value);
        }

        let rep = req.call().map_err(|e| Error::Index(e.to_string()))?;
        rep.into_string().map_err(|e| Error::Index(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_index_fails() {
        let solr = Solr::new(None);
        assert!(matches!(solr.select(&[]), Err(Error::Index(..))));
    }

    #[test]
    fn unreachable_index_fails() {
        let solr = Solr::new(Some("http://127.0.0.1:9/solr/"));
        assert_eq!(solr.url.as_deref(), Some("http://127.0.0.1:9/solr"));

        let params = [("q", "ocr_text:word".to_string())];
        assert!(matches!(solr.select(&params), Err(Error::Index(..))));
    }
}
