//! Hand-authored explanatory text, code snippets and links.
//!
//! Notes are Markdown so the web host can render them; the terminal host prints
//! them as-is.

use crate::scenario::{Era, Scenario};

/// One stage in a reconciliation walkthrough, worded for each status.
#[derive(Debug, Clone, Copy)]
pub struct StageText {
    pub pending: &'static str,
    pub active: &'static str,
    pub done: &'static str,
}

const fn stage(pending: &'static str, active: &'static str, done: &'static str) -> StageText {
    StageText {
        pending,
        active,
        done,
    }
}

pub const LEGACY_STACK_STAGES: [StageText; 5] = [
    stage("State Update Triggered", "State Update Triggered", "State Update Triggered"),
    stage("Begin Reconciliation", "Begin Reconciliation", "Begin Reconciliation"),
    stage(
        "Process Component Tree",
        "Processing Component Tree (BLOCKING)",
        "Process Component Tree",
    ),
    stage("Update DOM", "Updating DOM (BLOCKING)", "Update DOM"),
    stage("Return Control", "Return Control to Main Thread", "Control Returned"),
];

pub const FIBER_STAGES: [StageText; 5] = [
    stage("State Update Triggered", "State Update Triggered", "State Update Triggered"),
    stage(
        "Begin Fiber Reconciliation",
        "Begin Fiber Reconciliation",
        "Begin Fiber Reconciliation",
    ),
    stage(
        "Process Component Tree",
        "Process Component Tree (INTERRUPTIBLE)",
        "Process Component Tree",
    ),
    stage("Commit Phase", "Commit Phase (PRIORITIZED)", "Commit Phase"),
    stage("Complete", "Complete (UI Updated)", "Complete"),
];

pub const LEGACY_TYPE_STAGES: [StageText; 3] = [
    stage("Container Type Changed", "Container Type Changed", "Container Type Changed"),
    stage(
        "Check Component Type",
        "Different Type Detected (div → span)",
        "Different Type Detected",
    ),
    stage(
        "Unmount & Remount",
        "⚠️ Full Unmount & Remount (State Lost)",
        "⚠️ Full Unmount & Remount (State Lost)",
    ),
];

pub const MODERN_TYPE_STAGES: [StageText; 3] = [
    stage("Container Type Changed", "Container Type Changed", "Container Type Changed"),
    stage(
        "Check Component Structure",
        "Different Type Detected (div → span)",
        "Different Type Detected",
    ),
    stage(
        "Preserve Internal Components",
        "Internal Component State Preserved",
        "Internal Component State Preserved",
    ),
];

pub const COMPILE_PIPELINE: [&str; 4] = ["Template", "Analyze", "Optimize", "Generate JS"];
pub const RUNTIME_PIPELINE: [&str; 4] = ["JSX", "createElement", "Diff", "Update DOM"];

#[derive(Debug, Clone, Copy)]
pub struct Notes {
    pub heading: &'static str,
    pub markdown: &'static str,
}

pub fn panel_title(era: Era, scenario: Scenario) -> &'static str {
    match (era, scenario) {
        (Era::Legacy, Scenario::Stack) => "Problem 1: Blocking Stack Reconciler",
        (Era::Legacy, Scenario::ComponentType) => "Problem 2: Component Type Changes",
        (Era::Legacy, Scenario::DomUpdates) => "Problem 3: Inefficient DOM Updates",
        (Era::Modern, Scenario::Stack) => "Solution 1: Fiber Reconciler with Concurrent Mode",
        (Era::Modern, Scenario::ComponentType) => "Solution 2: Improved Component Type Handling",
        (Era::Modern, Scenario::DomUpdates) => "Solution 3: Optimized DOM Operations",
        (_, Scenario::FineGrained) => "Challenge 1: Fine-Grained Reactivity",
        (_, Scenario::Hydration) => "Challenge 2: Partial Hydration",
        (_, Scenario::Compiler) => "Challenge 3: Compiler Optimization",
        // Not offered by these eras; keep a sensible title anyway.
        (_, Scenario::Stack) => "Stack Reconciler",
        (_, Scenario::ComponentType) => "Component Type",
        (_, Scenario::DomUpdates) => "DOM Updates",
    }
}

pub fn intro(scenario: Scenario) -> Option<&'static str> {
    match scenario {
        Scenario::FineGrained => Some(
            "React's component-based updates vs. SolidJS/Svelte fine-grained reactive approach:",
        ),
        Scenario::Hydration => Some(
            "Despite improvements, React's hydration model still has overhead compared to islands architecture:",
        ),
        Scenario::Compiler => Some("React relies more on runtime than compile-time optimizations:"),
        _ => None,
    }
}

pub fn notes(era: Era, scenario: Scenario) -> Option<Notes> {
    let n = |heading, markdown| Some(Notes { heading, markdown });
    match (era, scenario) {
        (Era::Legacy, Scenario::Stack) => n(
            "Stack Reconciler Problems:",
            "- Synchronous processing blocks the main thread\n\
             - No prioritization of work\n\
             - Can't interrupt once started\n\
             - Counter freezes during reconciliation\n\
             - UI becomes unresponsive\n",
        ),
        (Era::Modern, Scenario::Stack) => n(
            "Fiber Reconciler Solutions:",
            "- Work is broken into smaller units (fibers)\n\
             - Processing can be interrupted and resumed\n\
             - Updates can be prioritized (high vs. low priority)\n\
             - UI remains responsive during reconciliation\n\
             - Uses `requestIdleCallback` to yield to browser\n",
        ),
        (Era::Legacy, Scenario::ComponentType) => n(
            "Early React Problem:",
            "When container element types change (`div` → `span`), early React would:\n\n\
             - Completely unmount the entire subtree\n\
             - Lose all internal component state (counter resets to 0)\n\
             - Remount everything from scratch\n\
             - Cause unnecessary DOM operations\n",
        ),
        (Era::Modern, Scenario::ComponentType) => n(
            "Modern React Solution:",
            "When container element types change (`div` → `span`), React now:\n\n\
             - Better tracks component instances in the virtual DOM\n\
             - Preserves internal component state when possible\n\
             - Uses smarter diffing algorithm to minimize DOM operations\n\
             - Counter state persists across container changes\n",
        ),
        (Era::Legacy, Scenario::DomUpdates) => n(
            "Fiber Reconciler Improvements:",
            "- Work can be split into chunks\n\
             - Work can be prioritized\n\
             - Work can be paused and resumed\n\
             - Previous work can be reused or aborted\n\
             - More efficient DOM operations\n",
        ),
        (Era::Modern, Scenario::DomUpdates) => n(
            "Beyond Fiber: Modern React Features:",
            "- **Suspense:** Handle loading states declaratively\n\
             - **Transitions:** Mark updates as non-urgent\n\
             - **Server Components:** Zero client-side JS for static parts\n\
             - **Streaming:** Progressive rendering of content\n\
             - **Automatic Batching:** Multiple state updates in one render\n",
        ),
        _ => None,
    }
}

/// Markdown for the compiler demo's "Toggle Advanced Example" section.
pub const COMPILER_DEEP_DIVE: [Notes; 2] = [
    Notes {
        heading: "Svelte's Approach",
        markdown: "- Static analysis at build time\n\
                   - Converts templates to highly optimized vanilla JS\n\
                   - No virtual DOM overhead\n\
                   - No diffing algorithm at runtime\n\
                   - Smaller bundle size\n",
    },
    Notes {
        heading: "React Compiler (Experimental)",
        markdown: "- Working on compile-time optimizations\n\
                   - Automatic memoization\n\
                   - Automates component splitting\n\
                   - Eliminates reconciliation when possible\n\
                   - Preserves React programming model\n",
    },
];

pub const MODERN_ENHANCEMENTS: &str = "- Selective hydration of interactive components\n\
                                       - Automatic batching of state updates\n\
                                       - Streaming server rendering\n\
                                       - Improved memory usage\n";

#[derive(Debug, Clone, Copy)]
pub struct Snippet {
    pub caption: &'static str,
    pub code: &'static str,
}

pub const LIST_WITHOUT_KEYS: Snippet = Snippet {
    caption: "List Rendering Without Keys",
    code: "<ul>\n  {items.map(item => (\n    <li>{item.text}</li>  // No key prop!\n  ))}\n</ul>",
};

pub const LIST_WITH_KEYS: Snippet = Snippet {
    caption: "List Rendering With Keys",
    code: "<ul>\n  {items.map(item => (\n    <li key={item.id}>{item.text}</li>  // With key prop!\n  ))}\n</ul>",
};

pub const LIST_WITH_KEYS_MODERN: Snippet = Snippet {
    caption: "List Rendering With Keys (Improved Algorithm)",
    code: "// Modern React with optimized diffing algorithm\n<ul>\n  {items.map(item => (\n    <li key={item.id}>{item.text}</li>\n  ))}\n</ul>",
};

pub const CONCURRENT_MODE: Snippet = Snippet {
    caption: "React 18 Concurrent Mode",
    code: "// React 18 Concurrent Mode example\nfunction App() {\n  const [isPending, startTransition] = useTransition();\n  \n  function handleClick() {\n    // Mark state update as non-urgent/non-blocking\n    startTransition(() => {\n      // This won't block the main thread\n      setItems([{ id: Date.now(), text: \"New Item\" }, ...items]);\n    });\n  }\n}",
};

pub const PRESERVED_CONTAINER: Snippet = Snippet {
    caption: "State survives a container change",
    code: "// React now preserves components despite parent changes\nfunction App() {\n  // The Counter component state persists even when Container changes\n  const Container = isSpan ? 'span' : 'div';\n  \n  return (\n    <Container className=\"container\">\n      <Counter /> {/* State is preserved! */}\n    </Container>\n  );\n}",
};

pub const SERVER_COMPONENTS: Snippet = Snippet {
    caption: "Server Components & Streaming SSR",
    code: "// Server Component (Next.js App Router)\n// No client-side JavaScript needed\nexport default async function ServerList() {\n  const items = await fetchItems(); // Server-side only\n  \n  return (\n    <ul>\n      {items.map(item => (\n        <li key={item.id}>{item.text}</li>\n      ))}\n    </ul>\n  );\n}",
};

pub const AUTOMATIC_BATCHING: Snippet = Snippet {
    caption: "Automatic Batching",
    code: "// Multiple state updates batched automatically\nfunction handleClick() {\n  // React 18 batches these into a single render\n  setName('Taylor');\n  setAge(25);\n  setItems([...items, newItem]);\n}",
};

pub const REACT_COUNTER: Snippet = Snippet {
    caption: "React Approach",
    code: "function ReactCounter() {\n  const [count, setCount] = useState(0);\n  \n  // The ENTIRE component re-renders\n  // on every state change\n  return (\n    <div>\n      <span>Counter: {count}</span>\n      <button onClick={() => \n        setCount(count + 1)}>\n        Increment\n      </button>\n    </div>\n  );\n}",
};

pub const SOLID_COUNTER: Snippet = Snippet {
    caption: "SolidJS/Svelte Approach",
    code: "function SolidCounter() {\n  const [count, setCount] = createSignal(0);\n  \n  // Only this text node updates\n  // Not the entire component\n  return (\n    <div>\n      <span>Counter: {count()}</span>\n      <button onClick={() => \n        setCount(count() + 1)}>\n        Increment\n      </button>\n    </div>\n  );\n}",
};

pub const ISLANDS_LAYOUT: Snippet = Snippet {
    caption: "Astro/Qwik Islands Architecture",
    code: "<!-- Astro/Qwik islands architecture -->\n<Layout>\n  <StaticHeader /> <!-- No JS -->\n  <InteractiveHero client:load /> <!-- Immediate -->\n  <StaticContent /> <!-- No JS -->\n  <InteractiveFooter client:visible /> <!-- When visible -->\n</Layout>",
};

pub const SERVER_COMPONENT_SPLIT: Snippet = Snippet {
    caption: "React Server Components Approach",
    code: "// React Server Components\n// Header.js (Server Component)\nexport default function Header() {\n  return <header>...</header>;\n}\n\n// Hero.js\n'use client'; // Client Component\nexport default function Hero() {\n  return <section>...</section>;\n}",
};

pub const SVELTE_SOURCE: Snippet = Snippet {
    caption: "Svelte's Compile-Time Approach",
    code: "<!-- Svelte -->\n<script>\n  let count = 0;\n</script>\n\n<button on:click={() => count++}>\n  Count: {count}\n</button>",
};

pub const SVELTE_COMPILED: Snippet = Snippet {
    caption: "Compiled output",
    code: "// Compiled output\nfunction create_fragment(ctx) {\n  let button;\n  let t0;\n  let t1;\n  let mounted;\n  \n  return {\n    c() {\n      button = element(\"button\");\n      t0 = text(\"Count: \");\n      t1 = text(ctx[0]);\n    },\n    m(target, anchor) {\n      // Optimal DOM code\n    },\n    p(ctx, [dirty]) {\n      if (dirty & 1) \n        set_data(t1, ctx[0]);\n    }\n  };\n}",
};

pub const REACT_SOURCE: Snippet = Snippet {
    caption: "React's Runtime Approach",
    code: "// React\nfunction Counter() {\n  const [count, setCount] = \n    useState(0);\n  \n  return (\n    <button onClick={() => \n      setCount(count + 1)}>\n      Count: {count}\n    </button>\n  );\n}",
};

pub const REACT_RUNTIME: Snippet = Snippet {
    caption: "Runtime reconciliation",
    code: "// React runtime reconciliation\n// Creates virtual DOM\nconst element = {\n  type: 'button',\n  props: {\n    onClick: () => setCount(count + 1),\n    children: ['Count: ', count]\n  }\n};\n\n// Reconciles with previous render\n// Finds differences and updates DOM\n// More runtime overhead",
};

#[derive(Debug, Clone, Copy)]
pub struct Link {
    pub title: &'static str,
    pub url: &'static str,
}

pub const LEARN_MORE: [Link; 5] = [
    Link {
        title: "React 18 Release Notes",
        url: "https://react.dev/blog/2022/03/29/react-v18",
    },
    Link {
        title: "React Labs: What We've Been Working On",
        url: "https://react.dev/blog/2023/03/22/react-labs-what-we-have-been-working-on-march-2023",
    },
    Link {
        title: "SolidJS Documentation",
        url: "https://www.solidjs.com/",
    },
    Link {
        title: "Astro Islands Architecture",
        url: "https://astro.build/",
    },
    Link {
        title: "Qwik Framework",
        url: "https://qwik.builder.io/",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_offered_scenario_has_a_distinct_title() {
        let mut titles = Vec::new();
        for era in Era::all() {
            for s in era.scenarios() {
                titles.push(panel_title(*era, *s));
            }
        }
        let n = titles.len();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), n);
    }

    #[test]
    fn legacy_and_modern_walkthroughs_have_notes() {
        for era in [Era::Legacy, Era::Modern] {
            for s in era.scenarios() {
                let notes = notes(era, *s).expect("notes");
                assert!(notes.markdown.starts_with('-') || notes.markdown.starts_with("When"));
            }
        }
        assert!(notes(Era::Future, Scenario::Hydration).is_none());
    }

    #[test]
    fn links_are_https() {
        assert!(LEARN_MORE.iter().all(|l| l.url.starts_with("https://")));
    }
}
