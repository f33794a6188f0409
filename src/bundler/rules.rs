//! Loader rule table
//!
//! Declarative module rules handed to the external bundler. Loader chains and
//! their options differ between modes only where output naming or CSS
//! extraction is involved.

use serde::Serialize;
use serde_json::json;

use crate::config::Mode;

/// One module rule: a filename pattern and the loader chain applied to it
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    /// Regex matched against the module path
    pub test: &'static str,

    #[serde(rename = "use")]
    pub loaders: Vec<Loader>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Loader {
    pub loader: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl Loader {
    fn bare(loader: &'static str) -> Self {
        Self {
            loader,
            options: None,
        }
    }

    fn with_options(loader: &'static str, options: serde_json::Value) -> Self {
        Self {
            loader,
            options: Some(options),
        }
    }
}

/// Assemble the full rule table for the given mode.
pub fn module_rules(mode: Mode) -> Vec<Rule> {
    let is_prod = mode.is_production();

    vec![
        Rule {
            test: r"\.jsx?$",
            loaders: vec![Loader::bare("babel-loader"), Loader::bare("eslint-loader")],
            exclude: Some("node_modules"),
        },
        Rule {
            test: r"\.tsx?$",
            loaders: vec![
                Loader::bare("babel-loader"),
                Loader::bare("ts-loader"),
                Loader::bare("eslint-loader"),
            ],
            exclude: Some("node_modules"),
        },
        Rule {
            test: r"\.html$",
            loaders: vec![Loader::with_options(
                "html-loader",
                json!({
                    "minimize": is_prod,
                    "removeAttributeQuotes": false,
                }),
            )],
            exclude: None,
        },
        Rule {
            test: r"\.(c|le)ss$",
            loaders: {
                let mut chain = Vec::new();
                // Production extracts CSS into files; development injects
                // style tags so HMR can swap them.
                if is_prod {
                    chain.push(Loader::bare("mini-css-extract-plugin"));
                } else {
                    chain.push(Loader::bare("style-loader"));
                }
                chain.push(Loader::bare("css-loader"));
                chain.push(Loader::bare("postcss-loader"));
                chain.push(Loader::bare("less-loader"));
                chain
            },
            exclude: None,
        },
        Rule {
            test: r"\.(jpg|png|gif)$",
            loaders: vec![Loader::with_options(
                "url-loader",
                json!({
                    "limit": 8192,
                    "name": if is_prod {
                        "static/[hash:8].[ext]"
                    } else {
                        "static/[name].[hash:8].[ext]"
                    },
                }),
            )],
            exclude: None,
        },
        Rule {
            test: r"\.(eot|otf|svg|ttf|woff|woff2)\w*",
            loaders: vec![Loader::with_options(
                "file-loader",
                if is_prod {
                    json!({
                        "name": "[hash:8].[ext]",
                        "outputPath": "static/",
                        "publicPath": "./",
                    })
                } else {
                    json!({
                        "name": "[name].[hash:8].[ext]",
                        "outputPath": "static/",
                    })
                },
            )],
            exclude: None,
        },
    ]
}
