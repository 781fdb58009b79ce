//! Catalog of known PMD Java rules and the "followed rules" computation.
//!
//! Rules exist in two forms:
//! - short: `UnusedPrivateField`
//! - fully qualified: `category/java/bestpractices.xml/UnusedPrivateField`
//!
//! A whole category can also be referenced: `category/java/bestpractices.xml`.

use crate::report::PmdRecord;
use crate::ruleset::RulesetDocument;
use serde::Serialize;
use std::collections::BTreeSet;

const QUALIFIED_PREFIX: &str = "category/java/";

/// PMD Java rule category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    BestPractices,
    CodeStyle,
    Design,
    Documentation,
    ErrorProne,
    Multithreading,
    Performance,
    Security,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::BestPractices,
        Category::CodeStyle,
        Category::Design,
        Category::Documentation,
        Category::ErrorProne,
        Category::Multithreading,
        Category::Performance,
        Category::Security,
    ];

    /// File stem used in ruleset paths (`bestpractices`).
    pub fn slug(self) -> &'static str {
        match self {
            Category::BestPractices => "bestpractices",
            Category::CodeStyle => "codestyle",
            Category::Design => "design",
            Category::Documentation => "documentation",
            Category::ErrorProne => "errorprone",
            Category::Multithreading => "multithreading",
            Category::Performance => "performance",
            Category::Security => "security",
        }
    }

    /// Name PMD prints in the "Rule set" report column.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::BestPractices => "Best Practices",
            Category::CodeStyle => "Code Style",
            Category::Design => "Design",
            Category::Documentation => "Documentation",
            Category::ErrorProne => "Error Prone",
            Category::Multithreading => "Multithreading",
            Category::Performance => "Performance",
            Category::Security => "Security",
        }
    }

    /// Ruleset path passed to `pmd -rulesets`.
    pub fn ruleset_path(self) -> String {
        format!("{QUALIFIED_PREFIX}{}.xml", self.slug())
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.slug() == slug)
    }

    /// Parse a whole-category reference (`category/java/design.xml`).
    pub fn from_ruleset_path(path: &str) -> Option<Self> {
        let slug = path.strip_prefix(QUALIFIED_PREFIX)?.strip_suffix(".xml")?;
        Self::from_slug(slug)
    }

    fn rules(self) -> &'static [&'static str] {
        match self {
            Category::BestPractices => BEST_PRACTICES,
            Category::CodeStyle => CODE_STYLE,
            Category::Design => DESIGN,
            Category::Documentation => DOCUMENTATION,
            Category::ErrorProne => ERROR_PRONE,
            Category::Multithreading => MULTITHREADING,
            Category::Performance => PERFORMANCE,
            Category::Security => SECURITY,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RuleInfo {
    pub category: Category,
    pub name: &'static str,
}

impl RuleInfo {
    /// `category/java/<category>.xml/<Rule>`
    pub fn qualified_id(&self) -> String {
        format!("{}/{}", self.category.ruleset_path(), self.name)
    }

    pub fn help_url(&self) -> String {
        format!(
            "https://docs.pmd-code.org/latest/pmd_rules_java_{}.html#{}",
            self.category.slug(),
            self.name.to_lowercase()
        )
    }
}

/// Iterate every known rule, grouped by category in [`Category::ALL`] order.
pub fn catalog() -> impl Iterator<Item = RuleInfo> {
    Category::ALL.iter().flat_map(|&category| {
        category
            .rules()
            .iter()
            .map(move |&name| RuleInfo { category, name })
    })
}

pub fn find_by_short(name: &str) -> Option<RuleInfo> {
    catalog().find(|r| r.name == name)
}

pub fn find_by_qualified(id: &str) -> Option<RuleInfo> {
    let (path, name) = id.rsplit_once('/')?;
    let category = Category::from_ruleset_path(path)?;
    category
        .rules()
        .iter()
        .find(|&&n| n == name)
        .map(|&name| RuleInfo { category, name })
}

/// Look up a rule given either its short or fully-qualified ID.
pub fn qualify(id: &str) -> Option<RuleInfo> {
    if id.starts_with(QUALIFIED_PREFIX) {
        find_by_qualified(id)
    } else {
        find_by_short(id)
    }
}

/// Resolve an ID to the rules it names: one rule, or a whole category.
fn resolve(id: &str) -> Result<Vec<RuleInfo>, RuleMapError> {
    let id = id.trim();
    if let Some(category) = Category::from_ruleset_path(id) {
        return Ok(category
            .rules()
            .iter()
            .map(|&name| RuleInfo { category, name })
            .collect());
    }
    qualify(id).map(|r| vec![r]).ok_or_else(|| {
        tracing::warn!(rule = %id, "rule not in catalog");
        RuleMapError::UnknownRule { id: id.to_string() }
    })
}

#[derive(Debug, thiserror::Error)]
pub enum RuleMapError {
    #[error("failed to generate rule map")]
    UnknownRule { id: String },
}

/// The set of rules a project follows.
///
/// followed = (catalog \ violated) ∪ enabled, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct RuleMap {
    followed: Vec<RuleInfo>,
}

impl RuleMap {
    /// `violated`: rules observed as violated and not yet in the maintained config.
    /// `enabled`: rules (or whole categories) already enabled.
    pub fn new<V, E>(violated: V, enabled: E) -> Result<Self, RuleMapError>
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let mut violated_set = BTreeSet::new();
        for id in violated {
            violated_set.extend(resolve(id.as_ref())?);
        }
        let mut enabled_set = BTreeSet::new();
        for id in enabled {
            enabled_set.extend(resolve(id.as_ref())?);
        }
        Ok(Self::from_sets(&violated_set, &enabled_set))
    }

    /// Like [`RuleMap::new`], with the enabled set taken from an existing
    /// ruleset. Category references honor their `<exclude>` entries.
    pub fn from_document<V>(violated: V, document: &RulesetDocument) -> Result<Self, RuleMapError>
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut violated_set = BTreeSet::new();
        for id in violated {
            violated_set.extend(resolve(id.as_ref())?);
        }
        Ok(Self::from_sets(&violated_set, &enabled_rules(document)))
    }

    fn from_sets(violated: &BTreeSet<RuleInfo>, enabled: &BTreeSet<RuleInfo>) -> Self {
        let followed = catalog()
            .filter(|r| !violated.contains(r) || enabled.contains(r))
            .collect();
        Self { followed }
    }

    pub fn followed(&self) -> &[RuleInfo] {
        &self.followed
    }

    pub fn followed_ids(&self) -> Vec<String> {
        self.followed.iter().map(RuleInfo::qualified_id).collect()
    }

    pub fn is_followed(&self, id: &str) -> bool {
        qualify(id).is_some_and(|r| self.followed.contains(&r))
    }

    pub fn len(&self) -> usize {
        self.followed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.followed.is_empty()
    }
}

/// Every catalog rule an existing ruleset enables.
///
/// References outside the catalog (legacy `rulesets/java/*.xml` sets, custom
/// rules) enable nothing and are skipped.
pub fn enabled_rules(document: &RulesetDocument) -> BTreeSet<RuleInfo> {
    let mut enabled = BTreeSet::new();
    for reference in &document.rules {
        let Ok(rules) = resolve(&reference.reference) else {
            continue;
        };
        for rule in rules {
            if !reference.excludes.iter().any(|e| e == rule.name) {
                enabled.insert(rule);
            }
        }
    }
    enabled
}

/// Distinct violated rules (short names) not already enabled by `document`.
///
/// Rules outside the catalog are skipped.
pub fn violated_rules(records: &[PmdRecord], document: Option<&RulesetDocument>) -> Vec<String> {
    let enabled = document.map(enabled_rules).unwrap_or_default();

    let mut seen = BTreeSet::new();
    for record in records {
        let Some(rule) = find_by_short(&record.rule) else {
            tracing::debug!(rule = %record.rule, "skipping rule outside catalog");
            continue;
        };
        if !enabled.contains(&rule) {
            seen.insert(rule);
        }
    }
    seen.into_iter().map(|r| r.name.to_string()).collect()
}

static BEST_PRACTICES: &[&str] = &[
    "AbstractClassWithoutAbstractMethod",
    "AccessorClassGeneration",
    "AccessorMethodGeneration",
    "ArrayIsStoredDirectly",
    "AvoidMessageDigestField",
    "AvoidPrintStackTrace",
    "AvoidReassigningCatchVariables",
    "AvoidReassigningLoopVariables",
    "AvoidReassigningParameters",
    "AvoidStringBufferField",
    "AvoidUsingHardCodedIP",
    "CheckResultSet",
    "ConstantsInInterface",
    "DefaultLabelNotLastInSwitchStmt",
    "DoubleBraceInitialization",
    "ForLoopCanBeForeach",
    "ForLoopVariableCount",
    "GuardLogStatement",
    "JUnit4SuitesShouldUseSuiteAnnotation",
    "JUnit4TestShouldUseAfterAnnotation",
    "JUnit4TestShouldUseBeforeAnnotation",
    "JUnit4TestShouldUseTestAnnotation",
    "JUnit5TestShouldBePackagePrivate",
    "JUnitAssertionsShouldIncludeMessage",
    "JUnitTestContainsTooManyAsserts",
    "JUnitTestsShouldIncludeAssert",
    "JUnitUseExpected",
    "LiteralsFirstInComparisons",
    "LooseCoupling",
    "MethodReturnsInternalArray",
    "MissingOverride",
    "OneDeclarationPerLine",
    "PreserveStackTrace",
    "PrimitiveWrapperInstantiation",
    "ReplaceEnumerationWithIterator",
    "ReplaceHashtableWithMap",
    "ReplaceVectorWithList",
    "SimplifiableTestAssertion",
    "SwitchStmtsShouldHaveDefault",
    "SystemPrintln",
    "UnusedAssignment",
    "UnusedFormalParameter",
    "UnusedLocalVariable",
    "UnusedPrivateField",
    "UnusedPrivateMethod",
    "UseCollectionIsEmpty",
    "UseStandardCharsets",
    "UseTryWithResources",
    "UseVarargs",
    "WhileLoopWithLiteralBoolean",
];

static CODE_STYLE: &[&str] = &[
    "AtLeastOneConstructor",
    "AvoidDollarSigns",
    "AvoidProtectedFieldInFinalClass",
    "AvoidProtectedMethodInFinalClassNotExtending",
    "AvoidUsingNativeCode",
    "BooleanGetMethodName",
    "CallSuperInConstructor",
    "ClassNamingConventions",
    "CommentDefaultAccessModifier",
    "ConfusingTernary",
    "ControlStatementBraces",
    "EmptyControlStatement",
    "EmptyMethodInAbstractClassShouldBeAbstract",
    "ExtendsObject",
    "FieldDeclarationsShouldBeAtStartOfClass",
    "FieldNamingConventions",
    "FinalParameterInAbstractMethod",
    "ForLoopShouldBeWhileLoop",
    "FormalParameterNamingConventions",
    "GenericsNaming",
    "IdenticalCatchBranches",
    "LambdaCanBeMethodReference",
    "LinguisticNaming",
    "LocalHomeNamingConvention",
    "LocalInterfaceSessionNamingConvention",
    "LocalVariableCouldBeFinal",
    "LocalVariableNamingConventions",
    "LongVariable",
    "MDBAndSessionBeanNamingConvention",
    "MethodArgumentCouldBeFinal",
    "MethodNamingConventions",
    "NoPackage",
    "OnlyOneReturn",
    "PackageCase",
    "PrematureDeclaration",
    "RemoteInterfaceNamingConvention",
    "RemoteSessionInterfaceNamingConvention",
    "ShortClassName",
    "ShortMethodName",
    "ShortVariable",
    "TooManyStaticImports",
    "UnnecessaryAnnotationValueElement",
    "UnnecessaryBoxing",
    "UnnecessaryCast",
    "UnnecessaryConstructor",
    "UnnecessaryFullyQualifiedName",
    "UnnecessaryImport",
    "UnnecessaryLocalBeforeReturn",
    "UnnecessaryModifier",
    "UnnecessaryReturn",
    "UnnecessarySemicolon",
    "UseDiamondOperator",
    "UseExplicitTypes",
    "UselessParentheses",
    "UselessQualifiedThis",
    "UseShortArrayInitializer",
    "UseUnderscoresInNumericLiterals",
];

static DESIGN: &[&str] = &[
    "AbstractClassWithoutAnyMethod",
    "AvoidCatchingGenericException",
    "AvoidDeeplyNestedIfStmts",
    "AvoidRethrowingException",
    "AvoidThrowingNewInstanceOfSameException",
    "AvoidThrowingNullPointerException",
    "AvoidThrowingRawExceptionTypes",
    "AvoidUncheckedExceptionsInSignatures",
    "ClassWithOnlyPrivateConstructorsShouldBeFinal",
    "CognitiveComplexity",
    "CollapsibleIfStatements",
    "CouplingBetweenObjects",
    "CyclomaticComplexity",
    "DataClass",
    "DoNotExtendJavaLangError",
    "ExceptionAsFlowControl",
    "ExcessiveImports",
    "ExcessiveParameterList",
    "ExcessivePublicCount",
    "FinalFieldCouldBeStatic",
    "GodClass",
    "ImmutableField",
    "InvalidJavaBean",
    "LawOfDemeter",
    "LogicInversion",
    "LoosePackageCoupling",
    "MutableStaticState",
    "NcssCount",
    "NPathComplexity",
    "SignatureDeclareThrowsException",
    "SimplifiedTernary",
    "SimplifyBooleanExpressions",
    "SimplifyBooleanReturns",
    "SimplifyConditional",
    "SingularField",
    "SwitchDensity",
    "TooManyFields",
    "TooManyMethods",
    "UselessOverridingMethod",
    "UseObjectForClearerAPI",
    "UseUtilityClass",
];

static DOCUMENTATION: &[&str] = &[
    "CommentContent",
    "CommentRequired",
    "CommentSize",
    "UncommentedEmptyConstructor",
    "UncommentedEmptyMethodBody",
];

static ERROR_PRONE: &[&str] = &[
    "AssignmentInOperand",
    "AssignmentToNonFinalStatic",
    "AvoidAccessibilityAlteration",
    "AvoidAssertAsIdentifier",
    "AvoidBranchingStatementAsLastInLoop",
    "AvoidCallingFinalize",
    "AvoidCatchingNPE",
    "AvoidCatchingThrowable",
    "AvoidDecimalLiteralsInBigDecimalConstructor",
    "AvoidDuplicateLiterals",
    "AvoidEnumAsIdentifier",
    "AvoidFieldNameMatchingMethodName",
    "AvoidFieldNameMatchingTypeName",
    "AvoidInstanceofChecksInCatchClause",
    "AvoidLiteralsInIfCondition",
    "AvoidLosingExceptionInformation",
    "AvoidMultipleUnaryOperators",
    "AvoidUsingOctalValues",
    "BrokenNullCheck",
    "CallSuperFirst",
    "CallSuperLast",
    "CheckSkipResult",
    "ClassCastExceptionWithToArray",
    "CloneMethodMustBePublic",
    "CloneMethodMustImplementCloneable",
    "CloneMethodReturnTypeMustMatchClassName",
    "CloseResource",
    "CompareObjectsWithEquals",
    "ComparisonWithNaN",
    "ConfusingArgumentToVarargsMethod",
    "ConstructorCallsOverridableMethod",
    "DetachedTestCase",
    "DoNotCallGarbageCollectionExplicitly",
    "DoNotExtendJavaLangThrowable",
    "DoNotHardCodeSDCard",
    "DoNotTerminateVM",
    "DoNotThrowExceptionInFinally",
    "DontImportSun",
    "DontUseFloatTypeForLoopIndices",
    "EmptyCatchBlock",
    "EmptyFinalizer",
    "EqualsNull",
    "FinalizeDoesNotCallSuperFinalize",
    "FinalizeOnlyCallsSuperFinalize",
    "FinalizeOverloaded",
    "FinalizeShouldBeProtected",
    "IdempotentOperations",
    "ImplicitSwitchFallThrough",
    "InstantiationToGetClass",
    "InvalidLogMessageFormat",
    "JumbledIncrementer",
    "JUnitSpelling",
    "JUnitStaticSuite",
    "MethodWithSameNameAsEnclosingClass",
    "MisplacedNullCheck",
    "MissingSerialVersionUID",
    "MissingStaticMethodInNonInstantiatableClass",
    "MoreThanOneLogger",
    "NonCaseLabelInSwitchStatement",
    "NonSerializableClass",
    "NonStaticInitializer",
    "NullAssignment",
    "OverrideBothEqualsAndHashcode",
    "ProperCloneImplementation",
    "ProperLogger",
    "ReturnEmptyCollectionRatherThanNull",
    "ReturnFromFinallyBlock",
    "SimpleDateFormatNeedsLocale",
    "SingleMethodSingleton",
    "SingletonClassReturningNewInstance",
    "StaticEJBFieldShouldBeFinal",
    "StringBufferInstantiationWithChar",
    "SuspiciousEqualsMethodName",
    "SuspiciousHashcodeMethodName",
    "SuspiciousOctalEscape",
    "TestClassWithoutTestCases",
    "UnconditionalIfStatement",
    "UnnecessaryBooleanAssertion",
    "UnnecessaryCaseChange",
    "UnnecessaryConversionTemporary",
    "UnusedNullCheckInEquals",
    "UseCorrectExceptionLogging",
    "UseEqualsToCompareStrings",
    "UselessOperationOnImmutable",
    "UseLocaleWithCaseConversions",
    "UseProperClassLoader",
];

static MULTITHREADING: &[&str] = &[
    "AvoidSynchronizedAtMethodLevel",
    "AvoidSynchronizedStatement",
    "AvoidThreadGroup",
    "AvoidUsingVolatile",
    "DoNotUseThreads",
    "DontCallThreadRun",
    "DoubleCheckedLocking",
    "NonThreadSafeSingleton",
    "UnsynchronizedStaticFormatter",
    "UseConcurrentHashMap",
    "UseNotifyAllInsteadOfNotify",
];

static PERFORMANCE: &[&str] = &[
    "AddEmptyString",
    "AppendCharacterWithChar",
    "AvoidArrayLoops",
    "AvoidCalendarDateCreation",
    "AvoidFileStream",
    "AvoidInstantiatingObjectsInLoops",
    "BigIntegerInstantiation",
    "ConsecutiveAppendsShouldReuse",
    "ConsecutiveLiteralAppends",
    "InefficientEmptyStringCheck",
    "InefficientStringBuffering",
    "InsufficientStringBufferDeclaration",
    "OptimizableToArrayCall",
    "RedundantFieldInitializer",
    "StringInstantiation",
    "StringToString",
    "TooFewBranchesForASwitchStatement",
    "UseArrayListInsteadOfVector",
    "UseArraysAsList",
    "UseIndexOfChar",
    "UselessStringValueOf",
    "UseStringBufferForStringAppends",
    "UseStringBufferLength",
];

static SECURITY: &[&str] = &["HardCodedCryptoKey", "InsecureCryptoIv"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::RuleReference;

    #[test]
    fn test_short_names_are_unique() {
        let mut seen = BTreeSet::new();
        for rule in catalog() {
            assert!(seen.insert(rule.name), "duplicate rule {}", rule.name);
        }
    }

    #[test]
    fn test_qualify_both_forms() {
        let short = qualify("UnusedPrivateField").unwrap();
        let full = qualify("category/java/bestpractices.xml/UnusedPrivateField").unwrap();
        assert_eq!(short, full);
        assert_eq!(
            short.qualified_id(),
            "category/java/bestpractices.xml/UnusedPrivateField"
        );
        assert!(qualify("NoSuchRule").is_none());
        // Right name, wrong category.
        assert!(qualify("category/java/design.xml/UnusedPrivateField").is_none());
    }

    #[test]
    fn test_help_url() {
        let rule = find_by_short("EmptyCatchBlock").unwrap();
        assert_eq!(
            rule.help_url(),
            "https://docs.pmd-code.org/latest/pmd_rules_java_errorprone.html#emptycatchblock"
        );
    }

    #[test]
    fn test_category_paths() {
        assert_eq!(
            Category::Design.ruleset_path(),
            "category/java/design.xml"
        );
        assert_eq!(
            Category::from_ruleset_path("category/java/errorprone.xml"),
            Some(Category::ErrorProne)
        );
        assert_eq!(Category::from_ruleset_path("rulesets/java/quickstart.xml"), None);
    }

    #[test]
    fn test_followed_excludes_violated() {
        let map = RuleMap::new(["UnusedPrivateField", "EmptyCatchBlock"], Vec::<&str>::new())
            .unwrap();
        assert_eq!(map.len(), catalog().count() - 2);
        assert!(!map.is_followed("UnusedPrivateField"));
        assert!(!map.is_followed("category/java/errorprone.xml/EmptyCatchBlock"));
        assert!(map.is_followed("SystemPrintln"));
    }

    #[test]
    fn test_enabled_overrides_violated() {
        let map = RuleMap::new(
            ["UnusedPrivateField", "EmptyCatchBlock"],
            ["category/java/bestpractices.xml/UnusedPrivateField"],
        )
        .unwrap();
        assert!(map.is_followed("UnusedPrivateField"));
        assert!(!map.is_followed("EmptyCatchBlock"));
    }

    #[test]
    fn test_followed_in_catalog_order() {
        let map = RuleMap::new(Vec::<&str>::new(), Vec::<&str>::new()).unwrap();
        let expected: Vec<_> = catalog().collect();
        assert_eq!(map.followed(), expected.as_slice());
    }

    #[test]
    fn test_unknown_rule_fails() {
        let err = RuleMap::new(["NotARealRule"], Vec::<&str>::new()).unwrap_err();
        assert_eq!(err.to_string(), "failed to generate rule map");
        assert!(matches!(err, RuleMapError::UnknownRule { id } if id == "NotARealRule"));
    }

    #[test]
    fn test_category_reference_with_excludes() {
        let document = RulesetDocument {
            name: None,
            description: None,
            rules: vec![RuleReference {
                reference: "category/java/security.xml".into(),
                excludes: vec!["InsecureCryptoIv".into()],
            }],
        };
        let enabled = enabled_rules(&document);
        assert_eq!(enabled.len(), 1);
        assert_eq!(
            enabled.iter().next().unwrap().name,
            "HardCodedCryptoKey"
        );

        let map = RuleMap::from_document(["HardCodedCryptoKey", "InsecureCryptoIv"], &document)
            .unwrap();
        assert!(map.is_followed("HardCodedCryptoKey"));
        assert!(!map.is_followed("InsecureCryptoIv"));
    }

    #[test]
    fn test_violated_rules_skips_enabled_and_unknown() {
        let record = |rule: &str| PmdRecord {
            rule: rule.to_string(),
            ..Default::default()
        };
        let records = vec![
            record("UnusedPrivateField"),
            record("UnusedPrivateField"),
            record("EmptyCatchBlock"),
            record("MyCustomRule"),
        ];
        let document = RulesetDocument {
            name: None,
            description: None,
            rules: vec![RuleReference {
                reference: "category/java/errorprone.xml/EmptyCatchBlock".into(),
                excludes: Vec::new(),
            }],
        };
        assert_eq!(
            violated_rules(&records, Some(&document)),
            vec!["UnusedPrivateField".to_string()]
        );
        assert_eq!(violated_rules(&records, None).len(), 2);
    }

    #[test]
    fn test_non_catalog_references_are_skipped() {
        let document = RulesetDocument {
            name: None,
            description: None,
            rules: vec![
                RuleReference {
                    reference: "rulesets/java/quickstart.xml".into(),
                    excludes: Vec::new(),
                },
                RuleReference {
                    reference: "category/java/errorprone.xml/EmptyCatchBlock".into(),
                    excludes: Vec::new(),
                },
            ],
        };
        let enabled = enabled_rules(&document);
        assert_eq!(enabled.len(), 1);

        let records = vec![PmdRecord {
            rule: "SystemPrintln".into(),
            ..Default::default()
        }];
        let violated = violated_rules(&records, Some(&document));
        assert_eq!(violated, vec!["SystemPrintln".to_string()]);

        let map = RuleMap::from_document(&violated, &document).unwrap();
        assert!(!map.is_followed("SystemPrintln"));
        assert!(map.is_followed("EmptyCatchBlock"));
    }
}
