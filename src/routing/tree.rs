//! Path-variable tree.
//!
//! # Structure
//! ```text
//! forest
//!   "order" ── {} (leaf: show [orderId])
//!               └─ "item" ─┬─ {}       (leaf: item [orderId, itemId])
//!                          └─ "latest" (leaf: latest [orderId])
//! ```
//!
//! # Design Decisions
//! - One tree per distinct first segment, owned by the forest
//! - Children are owned by their parent; no back-edges
//! - A node has any number of literal children and at most one variable
//!   child; `/order/{id}` and `/order/{orderId}` share the same slot
//! - Variable names live on the leaf, so each template binds its own names
//! - Descent is greedy: a literal child wins, otherwise the variable child.
//!   There is no backtracking; ending on a non-leaf node is a miss

use std::collections::HashMap;

use crate::routing::handler::{HandlerDescriptor, PathVars};
use crate::routing::template::{split_path, DynamicTemplate, Segment};

/// Handler stored on a leaf, with the variable names of its template in
/// path order.
#[derive(Debug, Clone)]
struct Endpoint {
    handler: HandlerDescriptor,
    names: Vec<String>,
}

/// One path segment of a registered dynamic template.
#[derive(Debug, Clone)]
pub struct PathTreeNode {
    segment: Segment,
    endpoint: Option<Endpoint>,
    literals: HashMap<String, PathTreeNode>,
    variable: Option<Box<PathTreeNode>>,
}

impl PathTreeNode {
    fn new(segment: Segment) -> Self {
        Self {
            segment,
            endpoint: None,
            literals: HashMap::new(),
            variable: None,
        }
    }

    /// Segment that created this node. A shared variable slot keeps the name
    /// of the first template that reached it.
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// True if some template terminates at this node.
    pub fn is_leaf(&self) -> bool {
        self.endpoint.is_some()
    }

    pub fn handler(&self) -> Option<&HandlerDescriptor> {
        self.endpoint.as_ref().map(|e| &e.handler)
    }

    /// Child by segment text. Any `{name}` key selects the variable slot.
    pub fn child(&self, key: &str) -> Option<&PathTreeNode> {
        if key.starts_with('{') && key.ends_with('}') {
            self.variable.as_deref()
        } else {
            self.literals.get(key)
        }
    }

    pub fn children(&self) -> impl Iterator<Item = &PathTreeNode> {
        self.literals.values().chain(self.variable.as_deref())
    }

    fn child_entry(&mut self, segment: &Segment) -> &mut PathTreeNode {
        match segment {
            Segment::Literal(text) => self
                .literals
                .entry(text.clone())
                .or_insert_with(|| PathTreeNode::new(segment.clone())),
            Segment::Variable(_) => self
                .variable
                .get_or_insert_with(|| Box::new(PathTreeNode::new(segment.clone()))),
        }
    }

    /// Insert the remaining segments below this node.
    fn insert(&mut self, rest: &[Segment], endpoint: Endpoint) -> Option<HandlerDescriptor> {
        match rest.split_first() {
            None => self.endpoint.replace(endpoint).map(|e| e.handler),
            Some((head, tail)) => self.child_entry(head).insert(tail, endpoint),
        }
    }
}

/// All path-variable trees, keyed by literal first segment.
#[derive(Debug, Clone, Default)]
pub struct PathForest {
    trees: HashMap<String, PathTreeNode>,
}

impl PathForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one full template.
    ///
    /// Returns the displaced handler when a template of the same shape was
    /// already present, whatever its variable names were.
    pub fn insert(
        &mut self,
        template: &DynamicTemplate,
        handler: HandlerDescriptor,
    ) -> Option<HandlerDescriptor> {
        let root = template.root();
        let endpoint = Endpoint {
            handler,
            names: template.variables().map(str::to_string).collect(),
        };
        self.trees
            .entry(root.to_string())
            .or_insert_with(|| PathTreeNode::new(Segment::Literal(root.to_string())))
            .insert(template.rest(), endpoint)
    }

    /// Match a request path against the forest.
    pub fn find(&self, path: &str) -> Option<(&HandlerDescriptor, PathVars)> {
        let mut segments = split_path(path);
        let mut node = self.trees.get(segments.next()?)?;

        let mut values = Vec::new();
        for segment in segments {
            node = match node.literals.get(segment) {
                Some(child) => child,
                None if segment.is_empty() => return None,
                None => {
                    values.push(segment);
                    node.variable.as_deref()?
                }
            };
        }

        let endpoint = node.endpoint.as_ref()?;
        let bindings: PathVars = endpoint
            .names
            .iter()
            .zip(values)
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        Some((&endpoint.handler, bindings))
    }

    pub fn tree(&self, root: &str) -> Option<&PathTreeNode> {
        self.trees.get(root)
    }

    /// Number of trees (distinct first segments).
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::handler::tests::descriptor;
    use crate::routing::template::UrlTemplate;

    fn template(raw: &str) -> DynamicTemplate {
        match UrlTemplate::parse(raw).unwrap() {
            UrlTemplate::Dynamic(t) => t,
            UrlTemplate::Static(_) => panic!("{} is static", raw),
        }
    }

    fn forest(templates: &[(&str, &'static str)]) -> PathForest {
        let mut forest = PathForest::new();
        for &(raw, method) in templates {
            forest.insert(&template(raw), descriptor(method, method));
        }
        forest
    }

    #[test]
    fn test_shared_prefix_reuses_nodes() {
        let forest = forest(&[
            ("/order/{orderId}", "show"),
            ("/order/{orderId}/item/{itemId}", "item"),
            ("/order/{orderId}/item/latest", "latest"),
        ]);
        assert_eq!(forest.len(), 1);

        let root = forest.tree("order").unwrap();
        assert!(!root.is_leaf());
        assert_eq!(root.children().count(), 1);

        let order = root.child("{orderId}").unwrap();
        assert!(order.is_leaf());
        assert_eq!(order.handler().unwrap().method(), "show");
        assert_eq!(order.segment(), &Segment::Variable("orderId".into()));

        let item = order.child("item").unwrap();
        assert!(!item.is_leaf());
        assert!(item.handler().is_none());
        assert_eq!(item.children().count(), 2);
        assert!(item.child("{itemId}").unwrap().is_leaf());
        assert!(item.child("latest").unwrap().is_leaf());
    }

    #[test]
    fn test_one_tree_per_root() {
        let forest = forest(&[("/order/{id}", "order"), ("/user/{id}", "user")]);
        assert_eq!(forest.len(), 2);
        assert!(forest.tree("order").is_some());
        assert!(forest.tree("user").is_some());
    }

    #[test]
    fn test_find_binds_variables() {
        let forest = forest(&[("/order/{orderId}/item/{itemId}", "item")]);
        let (handler, vars) = forest.find("/order/42/item/7").unwrap();
        assert_eq!(handler.method(), "item");
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("orderId"), Some("42"));
        assert_eq!(vars.get("itemId"), Some("7"));
    }

    #[test]
    fn test_literal_beats_variable() {
        let forest = forest(&[
            ("/order/{orderId}/item/{itemId}", "item"),
            ("/order/{orderId}/item/latest", "latest"),
        ]);
        let (handler, vars) = forest.find("/order/9/item/latest").unwrap();
        assert_eq!(handler.method(), "latest");
        assert_eq!(vars.get("itemId"), None);
        assert_eq!(vars.get("orderId"), Some("9"));
    }

    #[test]
    fn test_dead_literal_branch_does_not_fall_back() {
        let forest = forest(&[("/a/b/{y}/e", "deep"), ("/a/{x}/d", "variable")]);

        // `b` takes the literal branch; `{y}` is not a leaf, so this is a miss.
        assert!(forest.find("/a/b/d").is_none());

        let (handler, vars) = forest.find("/a/b/d/e").unwrap();
        assert_eq!(handler.method(), "deep");
        assert_eq!(vars.get("y"), Some("d"));

        let (handler, vars) = forest.find("/a/c/d").unwrap();
        assert_eq!(handler.method(), "variable");
        assert_eq!(vars.get("x"), Some("c"));
    }

    #[test]
    fn test_variable_slot_shared_across_names() {
        let forest = forest(&[("/a/{x}/c", "c"), ("/a/{y}/d", "d")]);
        assert_eq!(forest.tree("a").unwrap().children().count(), 1);

        let (handler, vars) = forest.find("/a/1/d").unwrap();
        assert_eq!(handler.method(), "d");
        assert_eq!(vars.get("y"), Some("1"));
        assert_eq!(vars.get("x"), None);

        let (handler, vars) = forest.find("/a/2/c").unwrap();
        assert_eq!(handler.method(), "c");
        assert_eq!(vars.get("x"), Some("2"));
    }

    #[test]
    fn test_renamed_variable_replaces_handler() {
        for (first, second) in [("{id}", "{orderId}"), ("{orderId}", "{id}")] {
            let mut forest = forest(&[(&format!("/order/{}", first)[..], "first")]);
            let displaced = forest
                .insert(&template(&format!("/order/{}", second)), descriptor("second", "second"))
                .unwrap();
            assert_eq!(displaced.method(), "first");

            let (handler, vars) = forest.find("/order/5").unwrap();
            assert_eq!(handler.method(), "second");
            let name = second.trim_matches(|c| c == '{' || c == '}');
            assert_eq!(vars.get(name), Some("5"));
            assert_eq!(vars.len(), 1);
        }
    }

    #[test]
    fn test_misses() {
        let forest = forest(&[("/order/{orderId}/item/{itemId}", "item")]);
        assert!(forest.find("/order/42").is_none());
        assert!(forest.find("/order/42/item").is_none());
        assert!(forest.find("/order/42/item/7/extra").is_none());
        assert!(forest.find("/order/42/items/7").is_none());
        assert!(forest.find("/unknown/path").is_none());
        assert!(forest.find("/order/42/item/").is_none());
        assert!(forest.find("").is_none());
    }

    #[test]
    fn test_reinsert_replaces_handler() {
        let mut forest = forest(&[("/order/{id}/view", "first")]);
        let displaced = forest
            .insert(&template("/order/{id}/view"), descriptor("second", "second"))
            .unwrap();
        assert_eq!(displaced.method(), "first");
        assert_eq!(forest.find("/order/1/view").unwrap().0.method(), "second");
    }
}
