// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static source listings shown next to the graph.

use serde::{Deserialize, Serialize};
use traversal_viz_graph::TraversalMode;

/// Language of the displayed listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// JavaScript (default)
    #[default]
    JavaScript,
    /// Python
    Python,
    /// Java
    Java,
    /// C++
    Cpp,
    /// C
    C,
    /// C#
    CSharp,
    /// Go
    Go,
    /// Rust
    Rust,
}

impl Language {
    /// Get all languages for UI
    pub fn all() -> &'static [Language] {
        &[
            Language::JavaScript,
            Language::Python,
            Language::Java,
            Language::Cpp,
            Language::C,
            Language::CSharp,
            Language::Go,
            Language::Rust,
        ]
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Rust => "Rust",
        }
    }
}

/// Listing for a (mode, language) pair
pub fn listing(mode: TraversalMode, language: Language) -> &'static str {
    match mode {
        TraversalMode::BreadthFirst => bfs_listing(language),
        TraversalMode::DepthFirst => dfs_listing(language),
    }
}

fn bfs_listing(language: Language) -> &'static str {
    match language {
        Language::JavaScript => r#"function bfs(graph, start) {
  let queue = [start];
  let visited = new Set();

  while (queue.length > 0) {
    let node = queue.shift();
    if (!visited.has(node)) {
      visited.add(node);
      console.log(node);
      queue.push(...(graph[node] || []));
    }
  }
}"#,
        Language::Python => r#"def bfs(graph, start):
    queue = [start]
    visited = set()

    while queue:
        node = queue.pop(0)
        if node not in visited:
            visited.add(node)
            print(node)
            queue.extend(graph.get(node, []))"#,
        Language::Java => r#"import java.util.*;

public class BFS {
    public static void bfs(Map<String, List<String>> graph, String start) {
        Queue<String> queue = new LinkedList<>();
        Set<String> visited = new HashSet<>();
        queue.add(start);

        while (!queue.isEmpty()) {
            String node = queue.poll();
            if (!visited.contains(node)) {
                visited.add(node);
                System.out.println(node);
                queue.addAll(graph.getOrDefault(node, Collections.emptyList()));
            }
        }
    }
}"#,
        Language::Cpp => r#"#include <iostream>
#include <queue>
#include <unordered_set>
#include <map>
#include <vector>

using namespace std;

void bfs(map<string, vector<string>> &graph, string start) {
    queue<string> q;
    unordered_set<string> visited;
    q.push(start);

    while (!q.empty()) {
        string node = q.front();
        q.pop();
        if (visited.find(node) == visited.end()) {
            visited.insert(node);
            cout << node << endl;
            for (string neighbor : graph[node]) {
                q.push(neighbor);
            }
        }
    }
}"#,
        Language::C => r#"#include <stdio.h>
#include <stdlib.h>

void bfs(int graph[][10], int start, int n) {
    int queue[10], front = 0, rear = 0, visited[10] = {0};
    queue[rear++] = start;
    visited[start] = 1;

    while (front < rear) {
        int node = queue[front++];
        printf("%d ", node);

        for (int i = 0; i < n; i++) {
            if (graph[node][i] && !visited[i]) {
                queue[rear++] = i;
                visited[i] = 1;
            }
        }
    }
}"#,
        Language::CSharp => r#"using System;
using System.Collections.Generic;

class Program {
    static void BFS(Dictionary<string, List<string>> graph, string start) {
        Queue<string> queue = new Queue<string>();
        HashSet<string> visited = new HashSet<string>();
        queue.Enqueue(start);

        while (queue.Count > 0) {
            string node = queue.Dequeue();
            if (!visited.Contains(node)) {
                visited.Add(node);
                Console.WriteLine(node);
                foreach (var neighbor in graph[node]) {
                    queue.Enqueue(neighbor);
                }
            }
        }
    }
}"#,
        Language::Go => r#"package main

import "fmt"

func bfs(graph map[string][]string, start string) {
    queue := []string{start}
    visited := make(map[string]bool)

    for len(queue) > 0 {
        node := queue[0]
        queue = queue[1:]
        if !visited[node] {
            visited[node] = true
            fmt.Println(node)
            queue = append(queue, graph[node]...)
        }
    }
}"#,
        Language::Rust => r#"use std::collections::{HashMap, HashSet, VecDeque};

fn bfs(graph: &HashMap<&str, Vec<&str>>, start: &str) {
    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::new();

    while let Some(node) = queue.pop_front() {
        if visited.insert(node) {
            println!("{node}");
            if let Some(neighbors) = graph.get(node) {
                queue.extend(neighbors.iter().copied());
            }
        }
    }
}"#,
    }
}

fn dfs_listing(language: Language) -> &'static str {
    match language {
        Language::JavaScript => r#"function dfs(graph, node, visited = new Set()) {
  if (visited.has(node)) return;
  visited.add(node);
  console.log(node);
  (graph[node] || []).forEach(neighbor => dfs(graph, neighbor, visited));
}"#,
        Language::Python => r#"def dfs(graph, start, visited=None):
    if visited is None:
        visited = set()
    if start not in visited:
        visited.add(start)
        print(start)
        for neighbor in graph.get(start, []):
            dfs(graph, neighbor, visited)"#,
        Language::Java => r#"import java.util.*;

public class DFS {
    public static void dfs(Map<String, List<String>> graph, String node, Set<String> visited) {
        if (visited.contains(node)) return;
        visited.add(node);
        System.out.println(node);
        for (String neighbor : graph.getOrDefault(node, Collections.emptyList())) {
            dfs(graph, neighbor, visited);
        }
    }

    public static void startDFS(Map<String, List<String>> graph, String start) {
        Set<String> visited = new HashSet<>();
        dfs(graph, start, visited);
    }
}"#,
        Language::Cpp => r#"#include <iostream>
#include <unordered_set>
#include <map>
#include <vector>

using namespace std;

void dfs(map<string, vector<string>> &graph, string node, unordered_set<string> &visited) {
    if (visited.find(node) != visited.end()) return;
    visited.insert(node);
    cout << node << endl;
    for (string neighbor : graph[node]) {
        dfs(graph, neighbor, visited);
    }
}

void startDFS(map<string, vector<string>> &graph, string start) {
    unordered_set<string> visited;
    dfs(graph, start, visited);
}"#,
        Language::C => r#"#include <stdio.h>

void dfs(int graph[][10], int node, int visited[], int n) {
    if (visited[node]) return;
    visited[node] = 1;
    printf("%d ", node);
    for (int i = 0; i < n; i++) {
        if (graph[node][i] && !visited[i]) {
            dfs(graph, i, visited, n);
        }
    }
}"#,
        Language::CSharp => r#"using System;
using System.Collections.Generic;

class Program {
    static void DFS(Dictionary<string, List<string>> graph, string node, HashSet<string> visited) {
        if (visited.Contains(node)) return;
        visited.Add(node);
        Console.WriteLine(node);
        foreach (var neighbor in graph[node]) {
            DFS(graph, neighbor, visited);
        }
    }

    static void StartDFS(Dictionary<string, List<string>> graph, string start) {
        HashSet<string> visited = new HashSet<string>();
        DFS(graph, start, visited);
    }
}"#,
        Language::Go => r#"package main

import "fmt"

func dfs(graph map[string][]string, node string, visited map[string]bool) {
    if visited[node] {
        return
    }
    visited[node] = true
    fmt.Println(node)
    for _, neighbor := range graph[node] {
        dfs(graph, neighbor, visited)
    }
}

func startDFS(graph map[string][]string, start string) {
    visited := make(map[string]bool)
    dfs(graph, start, visited)
}"#,
        Language::Rust => r#"use std::collections::{HashMap, HashSet};

fn dfs<'a>(graph: &HashMap<&'a str, Vec<&'a str>>, node: &'a str, visited: &mut HashSet<&'a str>) {
    if !visited.insert(node) {
        return;
    }
    println!("{node}");
    for &neighbor in graph.get(node).into_iter().flatten() {
        dfs(graph, neighbor, visited);
    }
}"#,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_has_listing() {
        for mode in TraversalMode::all() {
            for language in Language::all() {
                let text = listing(*mode, *language);
                let name = mode.short_name().to_lowercase();
                assert!(!text.trim().is_empty());
                assert!(
                    text.to_lowercase().contains(&name),
                    "{:?}/{} listing should mention {name}",
                    mode,
                    language.name()
                );
            }
        }
    }

    #[test]
    fn test_listings_differ_by_mode() {
        for language in Language::all() {
            assert_ne!(
                listing(TraversalMode::BreadthFirst, *language),
                listing(TraversalMode::DepthFirst, *language)
            );
        }
    }
}
