//! Grouping of executions by declaring class
//!
//! Classes sort lexicographically by fully-qualified name; executions within
//! a class sort by method name. Repeated invocations of the same data-driven
//! method keep their original relative order.

use std::collections::BTreeMap;

use crate::execution::TestExecution;

/// The executions of one class, ordered by method name
#[derive(Debug)]
pub struct ClassGroup<'a> {
    /// Fully-qualified class name
    pub class_name: &'a str,
    /// Executions ordered by method name, stable for equal names
    pub executions: Vec<&'a TestExecution>,
}

/// Group executions by declaring class.
///
/// Equal method names are placed via an order-preserving rank search: the
/// insertion point is found by binary search and ties resolve by appending,
/// so multiple invocations of one data-driven method keep their original
/// relative order. Empty input yields an empty vector.
pub fn group_by_class<'a, I>(executions: I) -> Vec<ClassGroup<'a>>
where
    I: IntoIterator<Item = &'a TestExecution>,
{
    let mut by_class: BTreeMap<&str, Vec<&TestExecution>> = BTreeMap::new();
    for execution in executions {
        let group = by_class.entry(execution.class_name.as_str()).or_default();
        let at = group.partition_point(|e| e.method_name.as_str() <= execution.method_name.as_str());
        group.insert(at, execution);
    }
    by_class
        .into_iter()
        .map(|(class_name, executions)| ClassGroup {
            class_name,
            executions,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(class: &str, method: &str, params: &[&str]) -> TestExecution {
        TestExecution::passed(class, method, "main@1", 0, 1)
            .with_parameters(params.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_empty_input_yields_empty_mapping() {
        let groups = group_by_class(std::iter::empty::<&TestExecution>());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_classes_sort_by_qualified_name() {
        let executions = vec![
            exec("b.B", "testX", &[]),
            exec("a.A", "testX", &[]),
            exec("c.C", "testX", &[]),
        ];
        let groups = group_by_class(&executions);
        let names: Vec<&str> = groups.iter().map(|g| g.class_name).collect();
        assert_eq!(names, vec!["a.A", "b.B", "c.C"]);
    }

    #[test]
    fn test_methods_sort_within_class() {
        let executions = vec![
            exec("a.A", "testC", &[]),
            exec("a.A", "testA", &[]),
            exec("a.A", "testB", &[]),
        ];
        let groups = group_by_class(&executions);
        let methods: Vec<&str> = groups[0]
            .executions
            .iter()
            .map(|e| e.method_name.as_str())
            .collect();
        assert_eq!(methods, vec!["testA", "testB", "testC"]);
    }

    #[test]
    fn test_repeated_method_keeps_insertion_order() {
        // Two data-provider runs of the same method, distinguishable by
        // their argument values.
        let executions = vec![
            exec("b.B", "testX", &[]),
            exec("a.A", "testData", &["first"]),
            exec("a.A", "testData", &["second"]),
        ];
        let groups = group_by_class(&executions);
        assert_eq!(groups[0].class_name, "a.A");
        assert_eq!(groups[1].class_name, "b.B");
        let params: Vec<&str> = groups[0]
            .executions
            .iter()
            .map(|e| e.parameters[0].as_str())
            .collect();
        assert_eq!(params, vec!["first", "second"]);
    }

    #[test]
    fn test_repeated_method_interleaved_with_others() {
        let executions = vec![
            exec("a.A", "testZ", &[]),
            exec("a.A", "testData", &["first"]),
            exec("a.A", "testA", &[]),
            exec("a.A", "testData", &["second"]),
            exec("a.A", "testData", &["third"]),
        ];
        let groups = group_by_class(&executions);
        let labels: Vec<String> = groups[0]
            .executions
            .iter()
            .map(|e| {
                e.parameters
                    .first()
                    .cloned()
                    .unwrap_or_else(|| e.method_name.clone())
            })
            .collect();
        assert_eq!(labels, vec!["testA", "first", "second", "third", "testZ"]);
    }
}
