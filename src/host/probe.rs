use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use tracing::debug;

use crate::host::grammar::ValueGrammar;
use crate::surface::ProbeElement;

/// Inline style of a detached element created by a [`Profile`](crate::host::Profile).
#[derive(Debug)]
pub struct ProbeStyle {
    grammars: Rc<BTreeMap<String, ValueGrammar>>,
    declarations: HashMap<String, String>,
}

impl ProbeStyle {
    pub fn new(grammars: Rc<BTreeMap<String, ValueGrammar>>) -> Self {
        Self {
            grammars,
            declarations: HashMap::new(),
        }
    }
}

impl ProbeElement for ProbeStyle {
    fn assign(&mut self, property: &str, value: &str) {
        let property = property.trim().to_ascii_lowercase();
        let Some(grammar) = self.grammars.get(&property) else {
            debug!(property, "assignment to unknown property ignored");
            return;
        };
        match grammar.accept(value) {
            Some(normalized) => {
                self.declarations.insert(property, normalized);
            }
            None => debug!(property, value, "value rejected"),
        }
    }

    fn read(&self, property: &str) -> String {
        self.declarations
            .get(&property.trim().to_ascii_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::grammar::ValueType;

    fn probe() -> ProbeStyle {
        let mut grammars = BTreeMap::new();
        grammars.insert(
            "display".to_string(),
            ValueGrammar::new(&["block".to_string(), "-webkit-box".to_string()], &[], &[]),
        );
        grammars.insert(
            "color".to_string(),
            ValueGrammar::new(&[], &[], &[ValueType::Color]),
        );
        ProbeStyle::new(Rc::new(grammars))
    }

    #[test]
    fn empty_until_assigned() {
        assert_eq!(probe().read("display"), "");
    }

    #[test]
    fn rejected_value_keeps_previous() {
        let mut probe = probe();
        probe.assign("display", "-webkit-box");
        probe.assign("display", "box");
        assert_eq!(probe.read("display"), "-webkit-box");
        probe.assign("display", "Block");
        assert_eq!(probe.read("display"), "block");
    }

    #[test]
    fn accepted_value_is_normalized() {
        let mut probe = probe();
        probe.assign("color", "#00f");
        assert_eq!(probe.read("COLOR"), "rgb(0, 0, 255)");
    }

    #[test]
    fn unknown_property_is_ignored() {
        let mut probe = probe();
        probe.assign("user-select", "none");
        assert_eq!(probe.read("user-select"), "");
    }
}
