//! Debug utilities: a human-readable tree dump and a structural checker.

use std::fmt;

use crate::node::Node;

impl<V: fmt::Debug> fmt::Display for Node<V> {
    /// One line per node, parent first:
    ///
    /// ```text
    ///  002 /[2] structural -
    ///  001  a[0] valued 1
    ///  001  b[0] valued 2
    /// ```
    ///
    /// Each segment is indented by the length of its ancestors' segments so
    /// it lines up under the key it extends. The format is for eyes only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl<V: fmt::Debug> Node<V> {
    fn render(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(
            f,
            " {:03} {:indent$}{}[{}] {} ",
            self.priority,
            "",
            String::from_utf8_lossy(&self.segment),
            self.children.len(),
            self.kind(),
            indent = indent,
        )?;
        match &self.value {
            Some(value) => writeln!(f, "{:?}", value)?,
            None => writeln!(f, "-")?,
        }
        for child in &self.children {
            child.render(f, indent + self.segment.len())?;
        }
        Ok(())
    }
}

impl<V> Node<V> {
    /// Verify tree integrity - returns list of issues found.
    ///
    /// Checks that the child index matches the children, that no two
    /// siblings start with the same byte and that only the root has an
    /// empty segment.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        self.verify_node(&mut issues, &mut Vec::new(), true);
        issues
    }

    fn verify_node(&self, issues: &mut Vec<String>, path: &mut Vec<u8>, is_root: bool) {
        let parent_len = path.len();
        path.extend_from_slice(&self.segment);
        let here = String::from_utf8_lossy(&path[..]).into_owned();

        if !is_root && self.segment.is_empty() {
            issues.push(format!("Non-root node at {:?} has empty segment", here));
        }
        if self.indices.len() != self.children.len() {
            issues.push(format!(
                "Node at {:?} has {} indices but {} children",
                here,
                self.indices.len(),
                self.children.len()
            ));
        }
        for (i, (&byte, child)) in self.indices.iter().zip(&self.children).enumerate() {
            if child.segment.first() != Some(&byte) {
                issues.push(format!(
                    "Node at {:?} indexes child {} by {:?} but its segment is {:?}",
                    here,
                    i,
                    byte as char,
                    String::from_utf8_lossy(&child.segment)
                ));
            }
        }
        for i in 0..self.indices.len() {
            for j in (i + 1)..self.indices.len() {
                if self.indices[i] == self.indices[j] {
                    issues.push(format!(
                        "Node at {:?} has duplicate child byte {:?}",
                        here, self.indices[i] as char
                    ));
                }
            }
        }

        for child in &self.children {
            child.verify_node(issues, path, false);
        }
        path.truncate(parent_len);
    }
}
