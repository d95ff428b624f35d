//! The registry of known component types.
//!
//! A [`Catalog`] maps a type name such as `"standard_scaler"` to a
//! [`ComponentSpec`]: its category, declared ports and default parameters.
//! [`Catalog::with_builtins`] pre-registers the standard ML building blocks;
//! additional types can be registered at any time.

use ahash::AHashMap;
use serde_json::json;

use crate::error::CatalogError;
use crate::graph::{Category, Component, PortSpec};

/// The blueprint a component is instantiated from.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    /// The machine-readable type name used in documents and lookups.
    pub type_name: String,
    /// The human-readable name shown in progress updates and UIs.
    pub display_name: String,
    pub category: Category,
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
    /// Initial configuration, copied into each instantiated component.
    pub defaults: AHashMap<String, serde_json::Value>,
}

impl ComponentSpec {
    pub fn new(
        type_name: impl Into<String>,
        display_name: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            display_name: display_name.into(),
            category,
            inputs: Vec::new(),
            outputs: Vec::new(),
            defaults: AHashMap::new(),
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<PortSpec>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PortSpec>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.defaults.insert(key.into(), value);
        self
    }
}

/// Registry of component specs, keyed by type name. Listing follows
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    specs: AHashMap<String, ComponentSpec>,
    order: Vec<String>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog pre-loaded with the built-in component types.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        register_builtin_specs(&mut catalog);
        catalog
    }

    /// Registers a spec, replacing any previous spec with the same type
    /// name.
    pub fn register(&mut self, spec: ComponentSpec) {
        if !self.specs.contains_key(&spec.type_name) {
            self.order.push(spec.type_name.clone());
        }
        self.specs.insert(spec.type_name.clone(), spec);
    }

    pub fn spec(&self, type_name: &str) -> Option<&ComponentSpec> {
        self.specs.get(type_name)
    }

    /// Registered type names, in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|name| name.as_str())
    }

    /// Registered type names of one category, in registration order.
    pub fn type_names_in(&self, category: Category) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .filter(move |name| {
                self.specs
                    .get(name.as_str())
                    .is_some_and(|spec| spec.category == category)
            })
            .map(|name| name.as_str())
    }

    /// Creates a component of the given type with the given id, copying the
    /// spec's ports and default configuration.
    pub fn instantiate(&self, type_name: &str, id: impl Into<String>) -> Result<Component, CatalogError> {
        let spec = self.spec(type_name).ok_or_else(|| CatalogError::UnknownComponentType {
            type_name: type_name.to_string(),
        })?;
        let mut component = Component::new(id, spec.display_name.clone(), spec.category)
            .with_inputs(spec.inputs.clone())
            .with_outputs(spec.outputs.clone());
        component.properties = spec.defaults.clone();
        Ok(component)
    }
}

fn register_builtin_specs(catalog: &mut Catalog) {
    // Data sources
    catalog.register(
        ComponentSpec::new("csv_loader", "CSV Loader", Category::Data)
            .with_outputs(vec![PortSpec::new("data", "dataframe")])
            .with_default("file_path", json!(""))
            .with_default("encoding", json!("utf-8")),
    );
    catalog.register(
        ComponentSpec::new("excel_loader", "Excel Loader", Category::Data)
            .with_outputs(vec![PortSpec::new("data", "dataframe")])
            .with_default("file_path", json!(""))
            .with_default("sheet", json!(0)),
    );
    catalog.register(
        ComponentSpec::new("data_cleaner", "Data Cleaner", Category::Data)
            .with_inputs(vec![PortSpec::new("data", "dataframe")])
            .with_outputs(vec![PortSpec::new("data", "dataframe")])
            .with_default("drop_na", json!(true)),
    );

    // Preprocessing
    catalog.register(
        ComponentSpec::new("standard_scaler", "Standard Scaler", Category::Preprocess)
            .with_inputs(vec![PortSpec::new("data", "dataframe")])
            .with_outputs(vec![PortSpec::new("data", "dataframe")])
            .with_default("with_mean", json!(true))
            .with_default("with_std", json!(true)),
    );
    catalog.register(
        ComponentSpec::new("min_max_scaler", "Min-Max Scaler", Category::Preprocess)
            .with_inputs(vec![PortSpec::new("data", "dataframe")])
            .with_outputs(vec![PortSpec::new("data", "dataframe")])
            .with_default("min", json!(0.0))
            .with_default("max", json!(1.0)),
    );
    catalog.register(
        ComponentSpec::new("train_test_split", "Train/Test Split", Category::Preprocess)
            .with_inputs(vec![PortSpec::new("data", "dataframe")])
            .with_outputs(vec![
                PortSpec::new("train", "dataframe"),
                PortSpec::new("test", "dataframe"),
            ])
            .with_default("test_size", json!(0.2))
            .with_default("random_state", json!(42)),
    );

    // Models
    catalog.register(
        ComponentSpec::new("linear_regression", "Linear Regression", Category::Model)
            .with_inputs(vec![PortSpec::new("train", "dataframe")])
            .with_outputs(vec![PortSpec::new("model", "model")])
            .with_default("fit_intercept", json!(true)),
    );
    catalog.register(
        ComponentSpec::new("logistic_regression", "Logistic Regression", Category::Model)
            .with_inputs(vec![PortSpec::new("train", "dataframe")])
            .with_outputs(vec![PortSpec::new("model", "model")])
            .with_default("max_iter", json!(100)),
    );
    catalog.register(
        ComponentSpec::new("random_forest", "Random Forest", Category::Model)
            .with_inputs(vec![PortSpec::new("train", "dataframe")])
            .with_outputs(vec![PortSpec::new("model", "model")])
            .with_default("n_estimators", json!(100))
            .with_default("max_depth", json!(null)),
    );
    catalog.register(
        ComponentSpec::new("decision_tree", "Decision Tree", Category::Model)
            .with_inputs(vec![PortSpec::new("train", "dataframe")])
            .with_outputs(vec![PortSpec::new("model", "model")])
            .with_default("max_depth", json!(null))
            .with_default("criterion", json!("gini")),
    );

    // Evaluation
    catalog.register(
        ComponentSpec::new("accuracy_score", "Accuracy Score", Category::Evaluate)
            .with_inputs(vec![
                PortSpec::new("model", "model"),
                PortSpec::new("test", "dataframe"),
            ])
            .with_outputs(vec![PortSpec::new("metrics", "metrics")]),
    );
    catalog.register(
        ComponentSpec::new("confusion_matrix", "Confusion Matrix", Category::Evaluate)
            .with_inputs(vec![
                PortSpec::new("model", "model"),
                PortSpec::new("test", "dataframe"),
            ])
            .with_outputs(vec![PortSpec::new("matrix", "metrics")])
            .with_default("normalize", json!(false)),
    );
    catalog.register(
        ComponentSpec::new("cross_validation", "Cross Validation", Category::Evaluate)
            .with_inputs(vec![
                PortSpec::new("model", "model"),
                PortSpec::new("data", "dataframe"),
            ])
            .with_outputs(vec![PortSpec::new("metrics", "metrics")])
            .with_default("folds", json!(5)),
    );

    // Outputs
    catalog.register(
        ComponentSpec::new("save_model", "Save Model", Category::Output)
            .with_inputs(vec![PortSpec::new("model", "model")])
            .with_default("file_path", json!("model.pkl")),
    );
    catalog.register(
        ComponentSpec::new("export_csv", "Export CSV", Category::Output)
            .with_inputs(vec![PortSpec::new("data", "dataframe")])
            .with_default("file_path", json!("output.csv")),
    );
    catalog.register(
        ComponentSpec::new("generate_report", "Generate Report", Category::Output)
            .with_inputs(vec![PortSpec::new("metrics", "metrics")])
            .with_default("format", json!("html")),
    );
}
