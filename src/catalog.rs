//! Third-party service catalog.
//!
//! One [`ServiceSpec`] per supported integration. The same table drives
//! auto-detection (manifests, env prefixes, template patterns, script
//! signatures) and the declared-service checks (env prefixes, SDK patterns,
//! remediation hints).

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Everything shipcheck knows about one service.
#[derive(Debug, Clone, Copy)]
pub struct ServiceSpec {
    /// Config key and check id.
    pub id: &'static str,
    /// Display name.
    pub title: &'static str,
    /// Package names looked for in dependency manifests.
    pub manifest_markers: &'static [&'static str],
    /// Env key prefixes proving the service is configured.
    pub env_prefixes: &'static [&'static str],
    /// Regexes matching SDK initialization or embed snippets.
    pub sdk_patterns: &'static [&'static str],
    /// Substrings identifying the provider inside a fetched script.
    pub script_signatures: &'static [&'static str],
    /// Env var named in remediation hints.
    pub env_hint: &'static str,
    /// SDK call named in remediation hints.
    pub sdk_hint: &'static str,
}

/// All supported services, in report order.
pub const SERVICES: &[ServiceSpec] = &[
    ServiceSpec {
        id: "stripe",
        title: "Stripe",
        manifest_markers: &[
            "stripe",
            "@stripe/stripe-js",
            "@stripe/react-stripe-js",
            "stripe/stripe-php",
            "stripe-rails",
        ],
        env_prefixes: &["STRIPE_", "NEXT_PUBLIC_STRIPE_", "VITE_STRIPE_", "PUBLIC_STRIPE_"],
        sdk_patterns: &[
            r"js\.stripe\.com",
            r"loadStripe\(",
            r"new\s+Stripe\(",
            r"Stripe\.api_key",
            r"\\Stripe\\Stripe::setApiKey",
            r"stripe\.api_key",
        ],
        script_signatures: &["js.stripe.com", "stripe.version"],
        env_hint: "STRIPE_SECRET_KEY",
        sdk_hint: "loadStripe(publishableKey) or new Stripe(secretKey)",
    },
    ServiceSpec {
        id: "sentry",
        title: "Sentry",
        manifest_markers: &[
            "@sentry/browser",
            "@sentry/nextjs",
            "@sentry/react",
            "@sentry/node",
            "@sentry/vue",
            "@sentry/sveltekit",
            "@sentry/astro",
            "@sentry/remix",
            "sentry-ruby",
            "sentry-rails",
            "sentry/sentry-laravel",
            "sentry-sdk",
        ],
        env_prefixes: &["SENTRY_", "NEXT_PUBLIC_SENTRY_", "VITE_SENTRY_", "PUBLIC_SENTRY_"],
        sdk_patterns: &[
            r"Sentry\.init\(",
            r"sentry-cdn\.com",
            r"sentry_sdk\.init\(",
            r"Sentry\.configure",
            r"Sentry\\Laravel",
        ],
        script_signatures: &["sentry-cdn.com", "__sentry__"],
        env_hint: "SENTRY_DSN",
        sdk_hint: "Sentry.init({ dsn })",
    },
    ServiceSpec {
        id: "posthog",
        title: "PostHog",
        manifest_markers: &["posthog-js", "posthog-node", "posthog-ruby", "posthog"],
        env_prefixes: &["POSTHOG_", "NEXT_PUBLIC_POSTHOG_", "VITE_POSTHOG_", "PUBLIC_POSTHOG_"],
        sdk_patterns: &[r"posthog\.init\(", r"i\.posthog\.com", r"PostHogProvider"],
        script_signatures: &["posthog.init", "i.posthog.com"],
        env_hint: "POSTHOG_KEY",
        sdk_hint: "posthog.init(key, { api_host })",
    },
    ServiceSpec {
        id: "plausible",
        title: "Plausible Analytics",
        manifest_markers: &["plausible-tracker", "next-plausible"],
        env_prefixes: &["PLAUSIBLE_", "NEXT_PUBLIC_PLAUSIBLE_"],
        sdk_patterns: &[r"plausible\.io/js", r"PlausibleProvider", r"Plausible\(\{"],
        script_signatures: &["plausible.io"],
        env_hint: "PLAUSIBLE_DOMAIN",
        sdk_hint: "<script defer data-domain=\"…\" src=\"https://plausible.io/js/script.js\">",
    },
    ServiceSpec {
        id: "google-analytics",
        title: "Google Analytics",
        manifest_markers: &["react-ga4", "vue-gtag", "ga-gtag", "@next/third-parties"],
        env_prefixes: &[
            "GA_",
            "GOOGLE_ANALYTICS",
            "NEXT_PUBLIC_GA_",
            "NEXT_PUBLIC_GOOGLE_ANALYTICS",
            "VITE_GA_",
        ],
        sdk_patterns: &[
            r"googletagmanager\.com/gtag/js",
            r#"gtag\(\s*['"]config['"]"#,
            r"google-analytics\.com/analytics\.js",
            r"<GoogleAnalytics",
        ],
        script_signatures: &["google-analytics.com", "gtag("],
        env_hint: "GA_MEASUREMENT_ID",
        sdk_hint: "gtag('config', 'G-XXXXXXX')",
    },
    ServiceSpec {
        id: "google-tag-manager",
        title: "Google Tag Manager",
        manifest_markers: &["react-gtm-module", "@gtm-support/vue-gtm", "@next/third-parties"],
        env_prefixes: &["GTM_", "NEXT_PUBLIC_GTM_", "VITE_GTM_"],
        sdk_patterns: &[
            r"googletagmanager\.com/gtm\.js",
            r"googletagmanager\.com/ns\.html",
            r"<GoogleTagManager",
        ],
        script_signatures: &["googletagmanager.com/gtm"],
        env_hint: "GTM_ID",
        sdk_hint: "the GTM container snippet in <head>",
    },
    ServiceSpec {
        id: "fathom",
        title: "Fathom Analytics",
        manifest_markers: &["fathom-client"],
        env_prefixes: &["FATHOM_", "NEXT_PUBLIC_FATHOM_"],
        sdk_patterns: &[r"cdn\.usefathom\.com", r"Fathom\.load\("],
        script_signatures: &["usefathom.com"],
        env_hint: "FATHOM_SITE_ID",
        sdk_hint: "Fathom.load(siteId)",
    },
    ServiceSpec {
        id: "umami",
        title: "Umami",
        manifest_markers: &["@umami/node"],
        env_prefixes: &["UMAMI_", "NEXT_PUBLIC_UMAMI_"],
        sdk_patterns: &[r"umami\.is/script\.js", r"data-website-id="],
        script_signatures: &["umami"],
        env_hint: "UMAMI_WEBSITE_ID",
        sdk_hint: "<script defer src=\"…/script.js\" data-website-id=\"…\">",
    },
    ServiceSpec {
        id: "mixpanel",
        title: "Mixpanel",
        manifest_markers: &["mixpanel-browser", "mixpanel", "mixpanel-ruby"],
        env_prefixes: &["MIXPANEL_", "NEXT_PUBLIC_MIXPANEL_", "VITE_MIXPANEL_"],
        sdk_patterns: &[r"mixpanel\.init\(", r"cdn\.mxpnl\.com"],
        script_signatures: &["mixpanel"],
        env_hint: "MIXPANEL_TOKEN",
        sdk_hint: "mixpanel.init(token)",
    },
    ServiceSpec {
        id: "segment",
        title: "Segment",
        manifest_markers: &[
            "@segment/analytics-next",
            "@segment/analytics-node",
            "analytics-ruby",
        ],
        env_prefixes: &["SEGMENT_", "NEXT_PUBLIC_SEGMENT_"],
        sdk_patterns: &[r"cdn\.segment\.com", r"AnalyticsBrowser\.load\(", r"analytics\.load\("],
        script_signatures: &["cdn.segment.com"],
        env_hint: "SEGMENT_WRITE_KEY",
        sdk_hint: "AnalyticsBrowser.load({ writeKey })",
    },
    ServiceSpec {
        id: "hotjar",
        title: "Hotjar",
        manifest_markers: &["@hotjar/browser", "react-hotjar"],
        env_prefixes: &["HOTJAR_", "NEXT_PUBLIC_HOTJAR_"],
        sdk_patterns: &[r"static\.hotjar\.com", r"Hotjar\.init\(", r"hjid\s*:"],
        script_signatures: &["hotjar"],
        env_hint: "HOTJAR_ID",
        sdk_hint: "Hotjar.init(siteId, version)",
    },
    ServiceSpec {
        id: "intercom",
        title: "Intercom",
        manifest_markers: &[
            "@intercom/messenger-js-sdk",
            "react-use-intercom",
            "intercom-rails",
        ],
        env_prefixes: &["INTERCOM_", "NEXT_PUBLIC_INTERCOM_"],
        sdk_patterns: &[r"widget\.intercom\.io", r"intercomSettings", r"IntercomProvider"],
        script_signatures: &["intercom"],
        env_hint: "INTERCOM_APP_ID",
        sdk_hint: "Intercom({ app_id })",
    },
    ServiceSpec {
        id: "crisp",
        title: "Crisp",
        manifest_markers: &["crisp-sdk-web"],
        env_prefixes: &["CRISP_", "NEXT_PUBLIC_CRISP_"],
        sdk_patterns: &[r"client\.crisp\.chat", r"CRISP_WEBSITE_ID", r"Crisp\.configure\("],
        script_signatures: &["crisp.chat"],
        env_hint: "CRISP_WEBSITE_ID",
        sdk_hint: "Crisp.configure(websiteId)",
    },
    ServiceSpec {
        id: "twilio",
        title: "Twilio",
        manifest_markers: &["twilio", "twilio-ruby", "twilio/sdk"],
        env_prefixes: &["TWILIO_"],
        sdk_patterns: &[
            r"twilio\(\s*[A-Za-z_]",
            r"Twilio::REST::Client",
            r"new\s+Twilio",
            r"twilio\.rest\.Client",
            r"from\s+twilio\.rest",
        ],
        script_signatures: &[],
        env_hint: "TWILIO_ACCOUNT_SID / TWILIO_AUTH_TOKEN",
        sdk_hint: "twilio(accountSid, authToken)",
    },
    ServiceSpec {
        id: "sendgrid",
        title: "SendGrid",
        manifest_markers: &["@sendgrid/mail", "sendgrid-ruby", "sendgrid/sendgrid", "sendgrid"],
        env_prefixes: &["SENDGRID_"],
        sdk_patterns: &[r"sgMail\.setApiKey\(", r"SendGrid::API", r"SendGridAPIClient\("],
        script_signatures: &[],
        env_hint: "SENDGRID_API_KEY",
        sdk_hint: "sgMail.setApiKey(key)",
    },
    ServiceSpec {
        id: "resend",
        title: "Resend",
        manifest_markers: &["resend"],
        env_prefixes: &["RESEND_"],
        sdk_patterns: &[r"new\s+Resend\(", r"Resend\.api_key", r"resend\.emails\.send"],
        script_signatures: &[],
        env_hint: "RESEND_API_KEY",
        sdk_hint: "new Resend(apiKey)",
    },
    ServiceSpec {
        id: "postmark",
        title: "Postmark",
        manifest_markers: &["postmark", "postmark-rails", "wildbit/postmark-php"],
        env_prefixes: &["POSTMARK_"],
        sdk_patterns: &[
            r"postmark\.ServerClient\(",
            r"Postmark::ApiClient",
            r"delivery_method\s*=\s*:postmark",
        ],
        script_signatures: &[],
        env_hint: "POSTMARK_API_TOKEN",
        sdk_hint: "new postmark.ServerClient(token)",
    },
    ServiceSpec {
        id: "mailgun",
        title: "Mailgun",
        manifest_markers: &["mailgun.js", "mailgun-ruby", "mailgun/mailgun-php"],
        env_prefixes: &["MAILGUN_"],
        sdk_patterns: &[r"mailgun\.client\(", r"Mailgun::Client", r"new\s+Mailgun\("],
        script_signatures: &[],
        env_hint: "MAILGUN_API_KEY",
        sdk_hint: "mailgun.client({ username, key })",
    },
    ServiceSpec {
        id: "supabase",
        title: "Supabase",
        manifest_markers: &["@supabase/supabase-js", "@supabase/ssr", "supabase"],
        env_prefixes: &[
            "SUPABASE_",
            "NEXT_PUBLIC_SUPABASE_",
            "VITE_SUPABASE_",
            "PUBLIC_SUPABASE_",
        ],
        sdk_patterns: &[
            r"supabase\.co",
            r"createBrowserClient\(",
            r"createServerClient\(",
            r"from\s+['\x22]@supabase/supabase-js['\x22]",
        ],
        script_signatures: &["supabase"],
        env_hint: "SUPABASE_URL / SUPABASE_ANON_KEY",
        sdk_hint: "createClient(url, anonKey)",
    },
    ServiceSpec {
        id: "firebase",
        title: "Firebase",
        manifest_markers: &["firebase", "firebase-admin", "@angular/fire"],
        env_prefixes: &["FIREBASE_", "NEXT_PUBLIC_FIREBASE_", "VITE_FIREBASE_"],
        sdk_patterns: &[r"initializeApp\(", r"firebaseConfig"],
        script_signatures: &["firebase"],
        env_hint: "FIREBASE_API_KEY",
        sdk_hint: "initializeApp(firebaseConfig)",
    },
    ServiceSpec {
        id: "clerk",
        title: "Clerk",
        manifest_markers: &[
            "@clerk/nextjs",
            "@clerk/clerk-react",
            "@clerk/remix",
            "@clerk/astro",
            "clerk-sdk-ruby",
        ],
        env_prefixes: &["CLERK_", "NEXT_PUBLIC_CLERK_", "VITE_CLERK_", "PUBLIC_CLERK_"],
        sdk_patterns: &[r"<ClerkProvider", r"clerkMiddleware\(", r"clerk\.accounts\.dev"],
        script_signatures: &["clerk"],
        env_hint: "CLERK_SECRET_KEY",
        sdk_hint: "<ClerkProvider> around the app",
    },
    ServiceSpec {
        id: "auth0",
        title: "Auth0",
        manifest_markers: &[
            "@auth0/nextjs-auth0",
            "@auth0/auth0-react",
            "@auth0/auth0-spa-js",
            "omniauth-auth0",
        ],
        env_prefixes: &["AUTH0_", "NEXT_PUBLIC_AUTH0_", "VITE_AUTH0_"],
        sdk_patterns: &[r"<Auth0Provider", r"handleAuth\(", r"Auth0Client\(", r"\.auth0\.com"],
        script_signatures: &["auth0"],
        env_hint: "AUTH0_CLIENT_ID / AUTH0_SECRET",
        sdk_hint: "new Auth0Client({ domain, clientId })",
    },
    ServiceSpec {
        id: "algolia",
        title: "Algolia",
        manifest_markers: &["algoliasearch", "react-instantsearch", "instantsearch.js"],
        env_prefixes: &["ALGOLIA_", "NEXT_PUBLIC_ALGOLIA_", "VITE_ALGOLIA_"],
        sdk_patterns: &[r"algoliasearch\(", r"<InstantSearch", r"algolia\.net"],
        script_signatures: &["algolia"],
        env_hint: "ALGOLIA_APP_ID / ALGOLIA_SEARCH_KEY",
        sdk_hint: "algoliasearch(appId, searchKey)",
    },
    ServiceSpec {
        id: "cloudinary",
        title: "Cloudinary",
        manifest_markers: &["cloudinary", "next-cloudinary", "@cloudinary/url-gen"],
        env_prefixes: &["CLOUDINARY_", "NEXT_PUBLIC_CLOUDINARY_"],
        sdk_patterns: &[r"res\.cloudinary\.com", r"<CldImage", r"cloudinary\.config\("],
        script_signatures: &["cloudinary"],
        env_hint: "CLOUDINARY_URL",
        sdk_hint: "cloudinary.config({ cloud_name, api_key, api_secret })",
    },
    ServiceSpec {
        id: "lemonsqueezy",
        title: "Lemon Squeezy",
        manifest_markers: &["@lemonsqueezy/lemonsqueezy.js", "lemonsqueezy"],
        env_prefixes: &["LEMONSQUEEZY_", "LEMON_SQUEEZY_"],
        sdk_patterns: &[r"lemonsqueezy\.com", r"lemonSqueezySetup\(", r"LemonSqueezy\."],
        script_signatures: &["lemonsqueezy"],
        env_hint: "LEMONSQUEEZY_API_KEY",
        sdk_hint: "lemonSqueezySetup({ apiKey })",
    },
    ServiceSpec {
        id: "paddle",
        title: "Paddle",
        manifest_markers: &["@paddle/paddle-js", "@paddle/paddle-node-sdk"],
        env_prefixes: &["PADDLE_", "NEXT_PUBLIC_PADDLE_"],
        sdk_patterns: &[
            r"cdn\.paddle\.com",
            r"Paddle\.Setup\(",
            r"Paddle\.Initialize\(",
            r"initializePaddle\(",
        ],
        script_signatures: &["paddle"],
        env_hint: "PADDLE_API_KEY",
        sdk_hint: "initializePaddle({ token })",
    },
];

/// Look up a service by id.
pub fn service(id: &str) -> Option<&'static ServiceSpec> {
    SERVICES.iter().find(|s| s.id == id)
}

fn marker_regex(package: &str) -> Option<Regex> {
    let pattern = format!(
        r#"(?m)(^|["'\s])({})($|["'\s(,:@=<>~])"#,
        regex::escape(package)
    );
    Regex::new(&pattern).ok()
}

/// Compiled marker patterns for every catalog package.
static MARKER_PATTERNS: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    SERVICES
        .iter()
        .flat_map(|spec| spec.manifest_markers.iter())
        .filter_map(|&package| marker_regex(package).map(|re| (package, re)))
        .collect()
});

/// Whether manifest text mentions a package name as a whole token.
///
/// Matches `"stripe"` in package.json, `gem 'stripe'` in a Gemfile and
/// `    stripe (10.1.0)` in Gemfile.lock, but not `stripe-mock-server`.
pub fn manifest_mentions(content: &str, package: &str) -> bool {
    match MARKER_PATTERNS.get(package) {
        Some(re) => re.is_match(content),
        None => marker_regex(package).is_some_and(|re| re.is_match(content)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let mut seen = HashSet::new();
        for spec in SERVICES {
            assert!(seen.insert(spec.id), "duplicate service id {}", spec.id);
        }
    }

    #[test]
    fn all_sdk_patterns_compile() {
        for spec in SERVICES {
            for pattern in spec.sdk_patterns {
                assert!(
                    Regex::new(pattern).is_ok(),
                    "{}: invalid pattern {pattern}",
                    spec.id
                );
            }
        }
    }

    #[test]
    fn every_service_has_evidence_sources() {
        for spec in SERVICES {
            assert!(!spec.env_prefixes.is_empty(), "{} has no env prefix", spec.id);
            assert!(!spec.sdk_patterns.is_empty(), "{} has no sdk pattern", spec.id);
            assert!(spec.env_prefixes.iter().all(|p| p.to_uppercase() == *p));
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(service("stripe").unwrap().title, "Stripe");
        assert!(service("nope").is_none());
    }

    #[test]
    fn manifest_mentions_package_json() {
        let content = r#"{ "dependencies": { "stripe": "^14.0.0", "@sentry/nextjs": "8" } }"#;
        assert!(manifest_mentions(content, "stripe"));
        assert!(manifest_mentions(content, "@sentry/nextjs"));
        assert!(!manifest_mentions(content, "posthog-js"));
    }

    #[test]
    fn manifest_mentions_gemfile_and_lock() {
        assert!(manifest_mentions("gem 'stripe'\n", "stripe"));
        assert!(manifest_mentions("    stripe (10.1.0)\n", "stripe"));
    }

    #[test]
    fn every_catalog_marker_is_precompiled() {
        for spec in SERVICES {
            for package in spec.manifest_markers {
                assert!(MARKER_PATTERNS.contains_key(package), "{package} not cached");
            }
        }
        assert!(manifest_mentions(r#""left-pad": "1""#, "left-pad"));
    }

    #[test]
    fn manifest_mentions_requires_whole_token() {
        assert!(!manifest_mentions(r#""stripe-mock-server": "1""#, "stripe"));
        assert!(!manifest_mentions(r#""@acme/stripe": "1""#, "stripe"));
    }
}
