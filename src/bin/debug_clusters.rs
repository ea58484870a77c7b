use thongna::{BoundaryGraph, Dictionary};

fn main() {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .unwrap_or_else(|| "ค่าจ้างที่ได้รับ 2021".to_string());
    // Optional second argument: comma-separated dictionary words
    let words = args
        .next()
        .unwrap_or_else(|| "ค่า,จ้าง,ค่าจ้าง,ที่,ได้,รับ,ได้รับ".to_string());
    println!("Input: {}", input);

    let clusters = thongna::tcc::clusters(&input);
    println!("\nClusters:");
    for (i, cluster) in clusters.iter().enumerate() {
        println!(
            "  {}: {:?} - bytes {}..{}, kind: {:?}",
            i,
            cluster.as_str(&input),
            cluster.start,
            cluster.end(),
            cluster.kind
        );
    }

    let dict = Dictionary::from_words(words.split(','));
    let graph = BoundaryGraph::build(&input, &clusters, &dict);
    println!("\nEdges ({} nodes):", graph.node_count());
    for i in 0..graph.node_count() {
        let ends: Vec<String> = graph
            .edges(i)
            .iter()
            .map(|e| format!("{}({})", e.end, e.kind.as_str()))
            .collect();
        println!("  {} -> {}", i, ends.join(" "));
    }

    println!("\nEdge count: {}", graph.edge_count());
}
