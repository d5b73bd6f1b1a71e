//! AnalysisHost and DocumentAnalysis — versioned document store for IDE features.
//!
//! Each open document is parsed and built into a context tree, then published
//! as an immutable `Arc<DocumentAnalysis>`. Publishing swaps the `Arc` under a
//! lock, so a reader holding a snapshot keeps a complete tree for as long as
//! it needs it, whatever happens to the document afterwards.
//!
//! ## Usage
//!
//! ```ignore
//! let host = AnalysisHost::new();
//!
//! // Apply document changes
//! host.open("file:///a.ds", "class A\nend\n", 1);
//! host.set_document("file:///a.ds", "class A\nvar int x\nend\n", 2)?;
//!
//! // Query a snapshot
//! let doc = host.snapshot("file:///a.ds").unwrap();
//! let symbols = doc.document_symbols();
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::base::{LineIndex, Position};
use crate::context::{BuildOptions, ContextScript, build_script};
use crate::parser::{Parse, parse};

use super::diagnostics::{Diagnostic, collect_diagnostics};
use super::hover::{HoverResult, hover};
use super::semantic_tokens::{SemanticToken, TokenOptions, semantic_tokens};
use super::symbols::{DocumentSymbol, document_symbols};

/// Configuration of the analysis host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AnalysisConfig {
    /// Build documentation contexts from `/** */` comments
    pub attach_documentation: bool,
    /// Semantic token categories to emit
    pub tokens: TokenOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self {
            attach_documentation: true,
            tokens: TokenOptions::default(),
        }
    }

    pub fn with_documentation(mut self, attach: bool) -> Self {
        self.attach_documentation = attach;
        self
    }

    pub fn with_expression_tokens(mut self, emit: bool) -> Self {
        self.tokens.expressions = emit;
        self
    }

    pub fn with_documentation_tokens(mut self, emit: bool) -> Self {
        self.tokens.documentation = emit;
        self
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            attach_documentation: self.attach_documentation,
        }
    }
}

/// Errors of host operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// A newer version of the document is already committed
    #[error("version {version} of {uri} is older than committed version {current}")]
    Superseded {
        uri: String,
        version: i32,
        current: i32,
    },
    /// The document is not open in the host
    #[error("document {uri} is not open")]
    NotOpen { uri: String },
    /// The provider has no content for the document
    #[error("no content available for {uri}")]
    Unavailable { uri: String },
}

/// Source of document content, e.g. the editor's open buffers.
pub trait DocumentProvider {
    /// Text and version of the document, if known
    fn document(&self, uri: &str) -> Option<(String, i32)>;
}

impl DocumentProvider for FxHashMap<String, (String, i32)> {
    fn document(&self, uri: &str) -> Option<(String, i32)> {
        self.get(uri).cloned()
    }
}

/// Everything known about one version of one document.
#[derive(Debug)]
pub struct DocumentAnalysis {
    uri: Arc<str>,
    version: i32,
    line_index: LineIndex,
    parse: Parse,
    script: ContextScript,
    config: AnalysisConfig,
}

impl DocumentAnalysis {
    /// Parse `text` and build its context tree.
    pub fn new(uri: &str, text: &str, version: i32, config: AnalysisConfig) -> Self {
        let parse = parse(text);
        let script = build_script(&parse, &config.build_options());
        Self {
            uri: Arc::from(uri),
            version,
            line_index: LineIndex::new(text),
            parse,
            script,
            config,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        self.line_index.text()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    pub fn script(&self) -> &ContextScript {
        &self.script
    }

    pub fn semantic_tokens(&self) -> Vec<SemanticToken> {
        semantic_tokens(&self.script, &self.line_index, &self.config.tokens)
    }

    /// Hover at a 0-indexed line/column position.
    pub fn hover(&self, position: Position) -> Option<HoverResult> {
        let offset = self.line_index.offset(position)?;
        hover(&self.script, &self.line_index, offset)
    }

    pub fn document_symbols(&self) -> Vec<DocumentSymbol> {
        document_symbols(&self.script, &self.line_index)
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        collect_diagnostics(&self.parse.errors, &self.script, &self.line_index)
    }
}

/// Published analyses plus the last committed version of closed documents.
#[derive(Default)]
struct DocumentStore {
    open: FxHashMap<Arc<str>, Arc<DocumentAnalysis>>,
    closed: FxHashMap<Arc<str>, i32>,
}

impl DocumentStore {
    /// The version that rejects a commit of `version`, if any
    fn superseded_by(&self, uri: &str, version: i32) -> Option<i32> {
        match self.open.get(uri) {
            Some(current) => (current.version > version).then_some(current.version),
            None => self
                .closed
                .get(uri)
                .copied()
                .filter(|&closed| closed >= version),
        }
    }
}

/// Owns all open documents.
///
/// Apply changes via `open()`, `set_document()` and `close()`, then read a
/// consistent per-document snapshot via `snapshot()`.
pub struct AnalysisHost {
    config: RwLock<AnalysisConfig>,
    documents: RwLock<DocumentStore>,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create a new empty AnalysisHost.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::new())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config: RwLock::new(config),
            documents: RwLock::new(DocumentStore::default()),
        }
    }

    pub fn config(&self) -> AnalysisConfig {
        *self.config.read()
    }

    /// Replace the configuration; applies to documents analyzed afterwards.
    pub fn set_config(&self, config: AnalysisConfig) {
        *self.config.write() = config;
    }

    /// Build a document without publishing it.
    pub fn analyze(&self, uri: &str, text: &str, version: i32) -> DocumentAnalysis {
        DocumentAnalysis::new(uri, text, version, self.config())
    }

    /// Publish a built document.
    ///
    /// Rejected if a newer version of the same document is already committed;
    /// an equal version replaces the stored one. After `close()`, versions up
    /// to the last committed one stay rejected until the document is reopened
    /// with `open()`.
    pub fn commit(&self, analysis: DocumentAnalysis) -> Result<Arc<DocumentAnalysis>, AnalysisError> {
        let mut documents = self.documents.write();
        if let Some(current) = documents.superseded_by(analysis.uri(), analysis.version) {
            tracing::debug!(
                uri = analysis.uri(),
                version = analysis.version,
                current,
                "discarding superseded analysis"
            );
            return Err(AnalysisError::Superseded {
                uri: analysis.uri().to_string(),
                version: analysis.version,
                current,
            });
        }
        let analysis = Arc::new(analysis);
        tracing::debug!(
            uri = analysis.uri(),
            version = analysis.version,
            errors = analysis.parse.errors.len(),
            "committed analysis"
        );
        documents.closed.remove(analysis.uri());
        documents.open.insert(analysis.uri.clone(), analysis.clone());
        Ok(analysis)
    }

    /// Analyze and publish a newly opened document, starting a fresh version
    /// history for it.
    pub fn open(&self, uri: &str, text: &str, version: i32) -> Arc<DocumentAnalysis> {
        let analysis = Arc::new(self.analyze(uri, text, version));
        let mut documents = self.documents.write();
        documents.closed.remove(uri);
        documents.open.insert(analysis.uri.clone(), analysis.clone());
        tracing::debug!(uri, version, "opened document");
        analysis
    }

    /// Analyze and publish one document.
    pub fn set_document(
        &self,
        uri: &str,
        text: &str,
        version: i32,
    ) -> Result<Arc<DocumentAnalysis>, AnalysisError> {
        self.commit(self.analyze(uri, text, version))
    }

    /// Analyze a batch of `(uri, text, version)` documents in parallel and
    /// publish them in input order.
    pub fn set_documents(
        &self,
        documents: &[(String, String, i32)],
    ) -> Vec<Result<Arc<DocumentAnalysis>, AnalysisError>> {
        let config = self.config();
        let built: Vec<DocumentAnalysis> = documents
            .par_iter()
            .map(|(uri, text, version)| DocumentAnalysis::new(uri, text, *version, config))
            .collect();
        built.into_iter().map(|analysis| self.commit(analysis)).collect()
    }

    /// Re-read one document from `provider` and publish it.
    pub fn refresh(
        &self,
        provider: &impl DocumentProvider,
        uri: &str,
    ) -> Result<Arc<DocumentAnalysis>, AnalysisError> {
        let (text, version) = provider.document(uri).ok_or_else(|| AnalysisError::Unavailable {
            uri: uri.to_string(),
        })?;
        self.set_document(uri, &text, version)
    }

    /// Re-read every open document from `provider`.
    pub fn refresh_open(
        &self,
        provider: &impl DocumentProvider,
    ) -> Vec<Result<Arc<DocumentAnalysis>, AnalysisError>> {
        let mut batch = Vec::new();
        let mut results = Vec::new();
        for uri in self.uris() {
            match provider.document(&uri) {
                Some((text, version)) => batch.push((uri.to_string(), text, version)),
                None => results.push(Err(AnalysisError::Unavailable {
                    uri: uri.to_string(),
                })),
            }
        }
        results.extend(self.set_documents(&batch));
        results
    }

    /// Remove a document; outstanding snapshots stay readable.
    pub fn close(&self, uri: &str) -> Result<(), AnalysisError> {
        let mut documents = self.documents.write();
        match documents.open.remove(uri) {
            Some(analysis) => {
                tracing::debug!(uri, version = analysis.version, "closed document");
                documents.closed.insert(analysis.uri.clone(), analysis.version);
                Ok(())
            }
            None => Err(AnalysisError::NotOpen {
                uri: uri.to_string(),
            }),
        }
    }

    /// The current published analysis of a document.
    pub fn snapshot(&self, uri: &str) -> Option<Arc<DocumentAnalysis>> {
        self.documents.read().open.get(uri).cloned()
    }

    /// URIs of all open documents, sorted.
    pub fn uris(&self) -> Vec<Arc<str>> {
        let mut uris: Vec<_> = self.documents.read().open.keys().cloned().collect();
        uris.sort();
        uris
    }

    fn require(&self, uri: &str) -> Result<Arc<DocumentAnalysis>, AnalysisError> {
        self.snapshot(uri).ok_or_else(|| AnalysisError::NotOpen {
            uri: uri.to_string(),
        })
    }

    pub fn semantic_tokens(&self, uri: &str) -> Result<Vec<SemanticToken>, AnalysisError> {
        Ok(self.require(uri)?.semantic_tokens())
    }

    pub fn hover(&self, uri: &str, position: Position) -> Result<Option<HoverResult>, AnalysisError> {
        Ok(self.require(uri)?.hover(position))
    }

    pub fn document_symbols(&self, uri: &str) -> Result<Vec<DocumentSymbol>, AnalysisError> {
        Ok(self.require(uri)?.document_symbols())
    }

    pub fn diagnostics(&self, uri: &str) -> Result<Vec<Diagnostic>, AnalysisError> {
        Ok(self.require(uri)?.diagnostics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URI: &str = "file:///demo.ds";

    #[test]
    fn test_set_and_snapshot() {
        let host = AnalysisHost::new();
        host.set_document(URI, "class A\nend\n", 1).expect("commit");
        let doc = host.snapshot(URI).expect("snapshot");
        assert_eq!(doc.version(), 1);
        assert_eq!(doc.text(), "class A\nend\n");
        assert_eq!(doc.script().members.len(), 1);
        assert_eq!(host.uris(), vec![Arc::<str>::from(URI)]);
    }

    #[test]
    fn test_older_version_is_rejected() {
        let host = AnalysisHost::new();
        host.set_document(URI, "class B\nend\n", 5).expect("commit");
        let err = host
            .set_document(URI, "class A\nend\n", 3)
            .expect_err("older version");
        assert_eq!(
            err,
            AnalysisError::Superseded {
                uri: URI.to_string(),
                version: 3,
                current: 5
            }
        );
        assert_eq!(host.snapshot(URI).map(|d| d.version()), Some(5));
    }

    #[test]
    fn test_equal_version_replaces() {
        let host = AnalysisHost::new();
        host.set_document(URI, "class A\nend\n", 2).expect("commit");
        host.set_document(URI, "interface I\nend\n", 2).expect("commit");
        let doc = host.snapshot(URI).expect("snapshot");
        assert!(doc.text().starts_with("interface"));
    }

    #[test]
    fn test_snapshot_survives_swap_and_close() {
        let host = AnalysisHost::new();
        host.set_document(URI, "class A\nvar int x\nend\n", 1).expect("commit");
        let old = host.snapshot(URI).expect("snapshot");
        host.set_document(URI, "", 2).expect("commit");
        host.close(URI).expect("close");
        assert!(host.snapshot(URI).is_none());
        assert_eq!(old.document_symbols()[0].children.len(), 1);
        assert_eq!(
            host.close(URI),
            Err(AnalysisError::NotOpen {
                uri: URI.to_string()
            })
        );
    }

    #[test]
    fn test_stale_build_after_close_is_rejected() {
        let host = AnalysisHost::new();
        let stale = host.analyze(URI, "class A\nend\n", 1);
        host.set_document(URI, "class B\nend\n", 2).expect("commit");
        host.close(URI).expect("close");

        assert_eq!(
            host.commit(stale).map(|_| ()),
            Err(AnalysisError::Superseded {
                uri: URI.to_string(),
                version: 1,
                current: 2
            })
        );
        assert!(host.snapshot(URI).is_none());
        assert!(host.set_document(URI, "class B\nend\n", 2).is_err());

        host.set_document(URI, "class C\nend\n", 3).expect("newer version");
        assert_eq!(host.snapshot(URI).map(|d| d.version()), Some(3));
    }

    #[test]
    fn test_open_starts_new_history() {
        let host = AnalysisHost::new();
        host.set_document(URI, "class A\nend\n", 7).expect("commit");
        host.close(URI).expect("close");

        let doc = host.open(URI, "class B\nend\n", 1);
        assert_eq!(doc.version(), 1);
        assert_eq!(host.snapshot(URI).map(|d| d.version()), Some(1));
        host.set_document(URI, "class C\nend\n", 2).expect("commit");
        assert_eq!(host.uris(), vec![Arc::<str>::from(URI)]);
    }

    #[test]
    fn test_config_disables_documentation() {
        let host = AnalysisHost::with_config(AnalysisConfig::new().with_documentation(false));
        let doc = host.analyze(URI, "/** Doc. */\nclass A\nend\n", 1);
        let crate::context::Context::Class(class) = &doc.script().members[0] else {
            panic!("expected class");
        };
        assert!(class.documentation.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_json() {
        let config: AnalysisConfig = serde_json::from_str(
            r#"{"attachDocumentation": false, "tokens": {"expressions": false}}"#,
        )
        .expect("config");
        assert!(!config.attach_documentation);
        assert!(!config.tokens.expressions);
        assert!(config.tokens.documentation);

        let defaults: AnalysisConfig = serde_json::from_str("{}").expect("config");
        assert_eq!(defaults, AnalysisConfig::default());
    }

    #[test]
    fn test_error_messages() {
        let err = AnalysisError::Superseded {
            uri: "a".to_string(),
            version: 1,
            current: 2,
        };
        assert_eq!(err.to_string(), "version 1 of a is older than committed version 2");
    }
}
