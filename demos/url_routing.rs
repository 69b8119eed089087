//! Routing requests by longest URL prefix
use radix_tree::StringTree;
use url::Url;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Route table keyed by URL prefix
    let mut routes = StringTree::<&str>::new();
    for (prefix, handler) in &[
        ("https://example.com/", "static"),
        ("https://example.com/about", "about"),
        ("https://example.com/blog", "blog index"),
        ("https://example.com/blog/", "blog post"),
        ("https://example.com/blog/drafts/", "drafts (auth)"),
        ("https://api.example.com/v1/", "api v1"),
    ] {
        // Parsing normalizes the prefix the same way requests are normalized
        let url = Url::parse(prefix)?;
        routes.insert(url.as_str().to_string(), *handler);
    }

    println!("Routing requests:");
    for request in &[
        "https://example.com/",
        "https://example.com/about",
        "https://EXAMPLE.com/blog/first-post",
        "https://example.com/blog/drafts/next",
        "https://api.example.com/v1/users?id=7",
        "https://api.example.com/v2/users",
    ] {
        let url = Url::parse(request)?;
        match routes.longest_prefix(url.as_str()) {
            Some((prefix, handler)) => println!("  {} → {} (via {})", url, handler, prefix),
            None => println!("  {} → no route", url),
        }
    }

    // Every route nested under the blog
    let blog = Url::parse("https://example.com/blog")?;
    println!("\nRoutes under {}:", blog);
    for (prefix, handler) in routes.view_prefix(blog.as_str()).iter() {
        println!("  {} → {}", prefix, handler);
    }

    // Routes a request passes through, shortest first
    let request = Url::parse("https://example.com/blog/drafts/next")?;
    println!("\nRoutes matching {}:", request);
    routes.walk_path(request.as_str(), |prefix, handler| {
        println!("  {} → {}", prefix, handler);
        false
    });

    // Drop the whole api host
    let removed = routes.remove_prefix("https://api.example.com/");
    println!("\nRemoved {} api route(s), {} left", removed, routes.len());

    Ok(())
}
