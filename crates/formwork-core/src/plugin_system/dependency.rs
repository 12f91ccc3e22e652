use std::collections::{HashMap, VecDeque};

use crate::plugin_system::error::PluginSystemError;

/// Orders a batch of plugins so that every plugin comes after the batch
/// members it depends on.
///
/// `nodes` is a list of `(name, dependencies)` pairs; names must be unique.
/// Dependencies outside the batch are ignored here, they are checked against
/// the loaded set when each plugin loads. Plugins without ordering
/// constraints keep their input order. Returns indices into `nodes`.
pub fn load_order(nodes: &[(String, Vec<String>)]) -> Result<Vec<usize>, PluginSystemError> {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (name.as_str(), i))
        .collect();

    // in_degree[i]: number of in-batch dependencies of node i
    // dependents[j]: nodes that depend on node j
    let mut in_degree = vec![0usize; nodes.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (i, (_, deps)) in nodes.iter().enumerate() {
        for dep in deps {
            if let Some(&j) = index.get(dep.as_str()) {
                in_degree[i] += 1;
                dependents[j].push(i);
            }
        }
    }

    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(i) = queue.pop_front() {
        order.push(i);
        for &dependent in &dependents[i] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if order.len() == nodes.len() {
        Ok(order)
    } else {
        // Whatever never reached in-degree zero sits on or behind a cycle
        let stuck = nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| in_degree[*i] > 0)
            .map(|(_, (name, _))| name.clone())
            .collect();
        Err(PluginSystemError::CyclicDependency(stuck))
    }
}
